/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - 認証なし: /health, /auth/ 以下
 * - それ以外は middleware::auth のチェーンを route_layer で掛ける
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware;
use crate::state::AppState;

use crate::api::v1::handlers::{
    auth::{login, signup},
    health::health,
    todo_lists::{
        create_todo_list, delete_todo_list, get_todo_list, list_todo_lists, list_todos_in_list,
        update_todo_list,
    },
    todos::{create_todo, delete_todo, get_todo, list_todos, update_todo},
    users::{delete_me, get_me, update_me},
};

fn public() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
}

fn protected() -> Router<AppState> {
    Router::new()
        .route("/users/me", get(get_me).patch(update_me).delete(delete_me))
        .route("/todo-lists", get(list_todo_lists).post(create_todo_list))
        .route(
            "/todo-lists/{list_id}",
            get(get_todo_list)
                .patch(update_todo_list)
                .delete(delete_todo_list),
        )
        .route("/todo-lists/{list_id}/todos", get(list_todos_in_list))
        .route("/todos", get(list_todos).post(create_todo))
        .route(
            "/todos/{todo_id}",
            get(get_todo).patch(update_todo).delete(delete_todo),
        )
}

pub fn routes(state: AppState) -> Router<AppState> {
    public().merge(middleware::auth::apply(protected(), state))
}
