use chrono::Utc;
use poem_openapi::{param::Path, payload::Json, OpenApi, Tags};
use std::sync::Arc;

use crate::api::BearerAuth;
use crate::config::AreaCatalog;
use crate::errors::api::ComplaintApiError;
use crate::services::TokenService;
use crate::stores::{ComplaintStore, NewComplaint};
use crate::types::db::complaint;
use crate::types::dto::complaints::{
    AreaListResponse, ComplaintListResponse, ComplaintResponse, CreateComplaintRequest,
    TimelineResponse, TimelineRowResponse, TransitionRequest, UpdateComplaintRequest,
};
use crate::types::internal::complaint::{Category, ComplaintAction, ComplaintStatus, Role};
use crate::types::internal::context::RequestContext;
use crate::workflow::{role_gate, timeline, TransitionEngine};

/// Complaint API endpoints
pub struct ComplaintsApi {
    store: Arc<ComplaintStore>,
    engine: Arc<TransitionEngine>,
    token_service: Arc<TokenService>,
    areas: AreaCatalog,
}

/// API tags for complaint endpoints
#[derive(Tags)]
enum ApiTags {
    /// Complaint lifecycle endpoints
    Complaints,
    /// Reference data endpoints
    ReferenceData,
}

impl ComplaintsApi {
    pub fn new(
        store: Arc<ComplaintStore>,
        engine: Arc<TransitionEngine>,
        token_service: Arc<TokenService>,
        areas: AreaCatalog,
    ) -> Self {
        Self {
            store,
            engine,
            token_service,
            areas,
        }
    }

    /// Build the request context from a validated bearer token
    ///
    /// The client address rides along for audit logging when the transport
    /// exposes one.
    fn context(
        &self,
        auth: &BearerAuth,
        req: &poem::Request,
    ) -> Result<RequestContext, ComplaintApiError> {
        let claims = self
            .token_service
            .validate_jwt(&auth.0.token)
            .map_err(|_| ComplaintApiError::unauthenticated())?;
        let role = Role::parse(&claims.role).map_err(|_| ComplaintApiError::unauthenticated())?;
        let ctx = RequestContext::new(claims.sub, role);
        Ok(match client_ip(req) {
            Some(ip) => ctx.with_ip_address(ip),
            None => ctx,
        })
    }

    /// Map a record to its response model for the given viewer
    ///
    /// The owner of an anonymous complaint is withheld from everyone but
    /// the owner themselves.
    fn to_response(
        ctx: &RequestContext,
        record: complaint::Model,
    ) -> Result<ComplaintResponse, ComplaintApiError> {
        let status =
            ComplaintStatus::parse(&record.status).map_err(ComplaintApiError::from_internal)?;
        let category =
            Category::parse(&record.category).map_err(ComplaintApiError::from_internal)?;
        let owner_id = if record.is_anonymous && record.owner_id != ctx.actor_id {
            None
        } else {
            Some(record.owner_id)
        };

        Ok(ComplaintResponse {
            id: record.id,
            title: record.title,
            description: record.description,
            category,
            status,
            assigned_area: record.assigned_area,
            latitude: record.latitude,
            longitude: record.longitude,
            address: record.address,
            is_anonymous: record.is_anonymous,
            owner_id,
            created_at: record.created_at,
        })
    }

    /// Fetch a record and check the gate for a record-scoped action
    async fn load_gated(
        &self,
        ctx: &RequestContext,
        id: &str,
        action: ComplaintAction,
    ) -> Result<complaint::Model, ComplaintApiError> {
        let record = self
            .store
            .find_by_id(id)
            .await
            .map_err(ComplaintApiError::from_internal)?
            .ok_or_else(|| ComplaintApiError::not_found(id))?;
        if !role_gate::authorize(ctx, action, Some(&record)) {
            return Err(ComplaintApiError::forbidden());
        }
        Ok(record)
    }
}

#[OpenApi]
impl ComplaintsApi {
    /// File a new complaint
    #[oai(path = "/complaints", method = "post", tag = "ApiTags::Complaints")]
    async fn create_complaint(
        &self,
        req: &poem::Request,
        auth: BearerAuth,
        body: Json<CreateComplaintRequest>,
    ) -> Result<Json<ComplaintResponse>, ComplaintApiError> {
        let ctx = self.context(&auth, req)?;
        if !role_gate::authorize(&ctx, ComplaintAction::Create, None) {
            return Err(ComplaintApiError::forbidden());
        }

        let record = self
            .store
            .create(NewComplaint {
                title: body.title.clone(),
                description: body.description.clone(),
                category: body.category,
                latitude: body.latitude,
                longitude: body.longitude,
                address: body.address.clone(),
                is_anonymous: body.is_anonymous,
                owner_id: ctx.actor_id.clone(),
            })
            .await
            .map_err(ComplaintApiError::from_internal)?;

        Ok(Json(Self::to_response(&ctx, record)?))
    }

    /// List complaints visible to the caller
    ///
    /// Citizens see their own filings; authorities and admins see all.
    #[oai(path = "/complaints", method = "get", tag = "ApiTags::Complaints")]
    async fn list_complaints(
        &self,
        req: &poem::Request,
        auth: BearerAuth,
    ) -> Result<Json<ComplaintListResponse>, ComplaintApiError> {
        let ctx = self.context(&auth, req)?;
        let records = match ctx.role {
            Role::Citizen => self.store.list_by_owner(&ctx.actor_id).await,
            Role::Authority | Role::Admin => self.store.list_all().await,
        }
        .map_err(ComplaintApiError::from_internal)?;

        let complaints = records
            .into_iter()
            .map(|r| Self::to_response(&ctx, r))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Json(ComplaintListResponse { complaints }))
    }

    /// Fetch a single complaint
    #[oai(path = "/complaints/:id", method = "get", tag = "ApiTags::Complaints")]
    async fn get_complaint(
        &self,
        req: &poem::Request,
        auth: BearerAuth,
        id: Path<String>,
    ) -> Result<Json<ComplaintResponse>, ComplaintApiError> {
        let ctx = self.context(&auth, req)?;
        let record = self.load_gated(&ctx, &id.0, ComplaintAction::View).await?;
        Ok(Json(Self::to_response(&ctx, record)?))
    }

    /// Edit title/description of an own complaint
    ///
    /// Only allowed while the complaint is still `registered`.
    #[oai(path = "/complaints/:id", method = "patch", tag = "ApiTags::Complaints")]
    async fn update_complaint(
        &self,
        req: &poem::Request,
        auth: BearerAuth,
        id: Path<String>,
        body: Json<UpdateComplaintRequest>,
    ) -> Result<Json<ComplaintResponse>, ComplaintApiError> {
        let ctx = self.context(&auth, req)?;
        self.load_gated(&ctx, &id.0, ComplaintAction::EditDetails)
            .await?;

        let record = self
            .store
            .update_details(&id.0, body.title.as_deref(), body.description.as_deref())
            .await
            .map_err(ComplaintApiError::from_internal)?;
        Ok(Json(Self::to_response(&ctx, record)?))
    }

    /// Apply a status transition
    ///
    /// `assigned_area`, when given, must come from the configured catalog;
    /// the engine itself only cares that an area is present where required.
    #[oai(
        path = "/complaints/:id/transition",
        method = "post",
        tag = "ApiTags::Complaints"
    )]
    async fn transition_complaint(
        &self,
        req: &poem::Request,
        auth: BearerAuth,
        id: Path<String>,
        body: Json<TransitionRequest>,
    ) -> Result<Json<ComplaintResponse>, ComplaintApiError> {
        let ctx = self.context(&auth, req)?;
        ensure_known_area(&self.areas, body.assigned_area.as_deref())?;
        let record = self
            .engine
            .transition(
                &ctx,
                &id.0,
                body.target_status,
                body.assigned_area.as_deref(),
                body.comment.as_deref(),
            )
            .await
            .map_err(ComplaintApiError::from_internal)?;
        Ok(Json(Self::to_response(&ctx, record)?))
    }

    /// Render the complaint's history as timeline rows
    #[oai(
        path = "/complaints/:id/timeline",
        method = "get",
        tag = "ApiTags::Complaints"
    )]
    async fn get_timeline(
        &self,
        req: &poem::Request,
        auth: BearerAuth,
        id: Path<String>,
    ) -> Result<Json<TimelineResponse>, ComplaintApiError> {
        let ctx = self.context(&auth, req)?;
        self.load_gated(&ctx, &id.0, ComplaintAction::View).await?;

        let history = self
            .store
            .history(&id.0)
            .await
            .map_err(ComplaintApiError::from_internal)?;
        let rows = timeline::project(&history, Utc::now())
            .map(|row| {
                row.map(|r| TimelineRowResponse {
                    status: r.status,
                    relative_label: r.relative_label,
                    comment: r.comment,
                    actor_label: r.actor_label,
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(ComplaintApiError::from_internal)?;

        Ok(Json(TimelineResponse { rows }))
    }

    /// List the configured area catalog
    #[oai(path = "/areas", method = "get", tag = "ApiTags::ReferenceData")]
    async fn list_areas(
        &self,
        req: &poem::Request,
        auth: BearerAuth,
    ) -> Result<Json<AreaListResponse>, ComplaintApiError> {
        self.context(&auth, req)?;
        Ok(Json(AreaListResponse {
            areas: self.areas.areas().to_vec(),
        }))
    }
}

/// Client address as seen by the listener, if the transport exposes one
fn client_ip(req: &poem::Request) -> Option<String> {
    req.remote_addr()
        .as_socket_addr()
        .map(|addr| addr.ip().to_string())
}

/// Reject an assigned area that is not in the configured catalog
fn ensure_known_area(areas: &AreaCatalog, area: Option<&str>) -> Result<(), ComplaintApiError> {
    match area {
        Some(a) if !areas.contains(a) => Err(ComplaintApiError::unknown_area(a)),
        _ => Ok(()),
    }
}
