/*
 * Responsibility
 * - v1 の request/response DTO
 * - 形式チェックは service 側 (validation) に任せ、ここは shape の変換だけ
 * - response は row から作る (password_hash などは載せない)
 */
pub mod auth;
pub mod todo_lists;
pub mod todos;
pub mod users;
