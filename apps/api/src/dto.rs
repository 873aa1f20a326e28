mod access;
mod common;
mod superadmins;

pub use access::{
    ActionCheckResponse, GrantPermissionItemRequest, GrantPermissionsRequest, GrantReceiptResponse,
    PermissionCheckResponse, PermissionResponse, ScopedGrantResponse, ViewerListResponse,
    VisibleAnswerUsersResponse,
};
pub use common::{HealthDependencyStatus, HealthResponse};
pub use superadmins::{
    GrantGlobalPermissionRequest, PromoteSuperadminRequest, SuperadminCheckResponse,
    SuperadminResponse,
};

#[cfg(test)]
mod tests {
    use super::{
        ActionCheckResponse, GrantGlobalPermissionRequest, GrantPermissionItemRequest,
        GrantPermissionsRequest, GrantReceiptResponse, HealthDependencyStatus, HealthResponse,
        PermissionCheckResponse, PermissionResponse, PromoteSuperadminRequest,
        ScopedGrantResponse, SuperadminCheckResponse, SuperadminResponse, ViewerListResponse,
        VisibleAnswerUsersResponse,
    };

    use crate::error::ErrorResponse;
    use ts_rs::Config;
    use ts_rs::TS;

    #[test]
    fn export_ts_bindings() -> Result<(), ts_rs::ExportError> {
        let config = Config::default();

        HealthResponse::export(&config)?;
        HealthDependencyStatus::export(&config)?;
        ErrorResponse::export(&config)?;
        PermissionResponse::export(&config)?;
        GrantPermissionItemRequest::export(&config)?;
        GrantPermissionsRequest::export(&config)?;
        ScopedGrantResponse::export(&config)?;
        GrantReceiptResponse::export(&config)?;
        PermissionCheckResponse::export(&config)?;
        ActionCheckResponse::export(&config)?;
        VisibleAnswerUsersResponse::export(&config)?;
        ViewerListResponse::export(&config)?;
        PromoteSuperadminRequest::export(&config)?;
        GrantGlobalPermissionRequest::export(&config)?;
        SuperadminResponse::export(&config)?;
        SuperadminCheckResponse::export(&config)?;

        Ok(())
    }
}
