use std::str::FromStr;

use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;

use canvass_application::GrantPermissionRequest;
use canvass_core::{QuestionnaireId, UserId, UserIdentity};
use canvass_domain::{QuestionnaireAction, ScopedGrantId};

use crate::dto::{
    ActionCheckResponse, GrantPermissionsRequest, GrantReceiptResponse, PermissionCheckResponse,
    PermissionResponse, ViewerListResponse, VisibleAnswerUsersResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

mod checks;
mod grants;
mod visibility;

pub use checks::{check_action_handler, check_permission_handler};
pub use grants::{grant_permissions_handler, list_permissions_handler};
pub use visibility::{list_viewers_handler, visible_answer_users_handler};
