/*
 * Responsibility
 * - Path の String を受け、正の i64 の内部 ID 型へ変換する
 * - 失敗時は AppError::BadRequest (400) へ変換
 * - todos / todo-lists で共通利用
 * 置くもの
 *  - ResourceId<T> の定義（ジェネリック本体）
 *  - impl FromRequestParts for ResourceId<T>
 * 置かないもの
 *  - Todo / TodoList といった具体リソース名 (types.rs へ)
 */
use std::marker::PhantomData;

use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::error::AppError;

#[derive(Clone, Copy)]
pub struct ResourceId<T> {
    pub id: i64,
    _marker: PhantomData<T>,
}

impl<T> ResourceId<T> {
    fn new(id: i64) -> Self {
        Self {
            id,
            _marker: PhantomData,
        }
    }
}

fn parse_or_bad_request(raw: &str) -> Result<i64, AppError> {
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AppError::BadRequest("invalid id")),
    }
}

impl<T, S> FromRequestParts<S> for ResourceId<T>
where
    T: Send + Sync,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::BadRequest("invalid id"))?;
        let id = parse_or_bad_request(&raw)?;
        Ok(Self::new(id))
    }
}

impl<T> std::fmt::Debug for ResourceId<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceId").field("id", &self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_positive_integers_are_ids() {
        assert_eq!(parse_or_bad_request("42").unwrap(), 42);
        for bad in ["0", "-1", "abc", "1.5", "", "99999999999999999999"] {
            assert!(parse_or_bad_request(bad).is_err(), "{bad:?} accepted");
        }
    }
}
