use rocket::http::{ContentType, Status};
use rocket::response::{self, status, Responder, Response};
use rocket::serde::json::{json, Value};
use rocket::Request;
use std::io::Cursor;

use crate::service::RequestError;

// Every failure is answered with 400 and the request echoed back as JSON.
impl<'r> Responder<'r, 'static> for RequestError {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        let body = serde_json::to_vec(&self.request).map_err(|e| {
            log::error!("Failed to serialize request echo: {}", e);
            Status::InternalServerError
        })?;

        Response::build()
            .status(Status::BadRequest)
            .header(ContentType::JSON)
            .sized_body(body.len(), Cursor::new(body))
            .ok()
    }
}

// Bodies or queries that never made it to a request: same status, JSON body.
#[catch(400)]
pub fn bad_request(req: &Request) -> status::BadRequest<Value> {
    rejected(req, "Request could not be read")
}

#[catch(422)]
pub fn unprocessable(req: &Request) -> status::BadRequest<Value> {
    rejected(req, "Request is missing a field or has a malformed value")
}

fn rejected(req: &Request, message: &str) -> status::BadRequest<Value> {
    log::warn!("Rejected {} {}: {}", req.method(), req.uri(), message);
    status::BadRequest(json!({
        "error": "Bad request",
        "message": message,
    }))
}
