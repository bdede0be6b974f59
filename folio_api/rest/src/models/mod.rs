use serde::Serialize;

pub mod contact;

#[derive(Debug, Serialize)]
pub struct ApiError<D> {
    pub success: bool,
    pub error: D,
}

#[derive(Debug, Serialize)]
pub struct ApiSuccess<M> {
    pub success: bool,
    pub message: M,
}
