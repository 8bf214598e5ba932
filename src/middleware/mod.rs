use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};

/// Заголовок, в котором клиент передаёт идентификатор пользователя.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Идентификатор вызывающего пользователя.
/// Аутентификации нет: доверяем тому, что прислал клиент.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerId(pub String);

impl<S> FromRequestParts<S> for CallerId
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, String);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or((
                StatusCode::BAD_REQUEST,
                format!("header {} is required", USER_ID_HEADER),
            ))?;

        Ok(CallerId(value.to_string()))
    }
}
