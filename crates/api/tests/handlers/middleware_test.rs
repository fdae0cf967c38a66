use axum::{http::StatusCode, response::IntoResponse};
use rstest::rstest;
use slotbook_api::middleware::error_handling::AppError;
use slotbook_core::errors::SlotError;

#[rstest]
#[case(SlotError::NotFound("Slot not found".into()), StatusCode::NOT_FOUND)]
#[case(SlotError::Validation("Invalid duration".into()), StatusCode::BAD_REQUEST)]
#[case(SlotError::Conflict("Already booked".into()), StatusCode::CONFLICT)]
#[case(SlotError::NotReady("Loading".into()), StatusCode::SERVICE_UNAVAILABLE)]
#[case(SlotError::LoadFailed("Unreachable".into()), StatusCode::BAD_GATEWAY)]
#[case(SlotError::Remote(eyre::eyre!("Rejected")), StatusCode::BAD_GATEWAY)]
#[case(
    SlotError::Internal(Box::new(std::io::Error::new(std::io::ErrorKind::Other, "boom"))),
    StatusCode::INTERNAL_SERVER_ERROR
)]
fn test_error_status_mapping(#[case] error: SlotError, #[case] expected: StatusCode) {
    let response = AppError(error).into_response();

    assert_eq!(response.status(), expected);
}
