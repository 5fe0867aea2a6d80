//! User registry routes. Paths keep the original function names.

use crate::handlers::{get_users, link_admin_to_non_admin, register_user};
use crate::state::AppState;
use axum::{routing::get, routing::post, Router};

pub fn user_routes(state: AppState) -> Router {
    Router::new()
        .route("/registerUser", post(register_user))
        .route("/linkAdminToNonAdmin", post(link_admin_to_non_admin))
        .route("/getUsers", get(get_users))
        .with_state(state)
}
