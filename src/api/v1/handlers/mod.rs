/*
 * Responsibility
 * - v1 handler の束ね
 * - handler は extractor で受け、service を呼び、DTO にして返すだけ
 */
pub mod auth;
pub mod health;
pub mod todo_lists;
pub mod todos;
pub mod users;
