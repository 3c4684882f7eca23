//! Success envelope shared by every JSON endpoint.
//!
//! Responses take the shape `{status: "success", message?, payload?}`.

use actix_web::HttpResponse;
use serde::Serialize;

/// Body of a successful response.
#[derive(Debug, Serialize)]
pub struct Success<'a, T: Serialize> {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    payload: Option<T>,
}

/// `200 OK` carrying `payload`.
///
/// # Examples
/// ```
/// use adoptme::inbound::http::envelope::payload;
///
/// let response = payload(vec!["Rex"]);
/// assert!(response.status().is_success());
/// ```
pub fn payload<T: Serialize>(payload: T) -> HttpResponse {
    HttpResponse::Ok().json(Success {
        status: "success",
        message: None,
        payload: Some(payload),
    })
}

/// `200 OK` carrying only a message.
pub fn message(message: &str) -> HttpResponse {
    HttpResponse::Ok().json(Success::<()> {
        status: "success",
        message: Some(message),
        payload: None,
    })
}

/// `200 OK` carrying both a message and a payload.
pub fn message_with_payload<T: Serialize>(message: &str, payload: T) -> HttpResponse {
    HttpResponse::Ok().json(Success {
        status: "success",
        message: Some(message),
        payload: Some(payload),
    })
}

#[cfg(test)]
mod tests {
    use actix_web::body::to_bytes;
    use serde_json::{Value, json};

    use super::*;

    async fn body(response: HttpResponse) -> Value {
        let bytes = to_bytes(response.into_body()).await.expect("read body");
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[actix_web::test]
    async fn payload_omits_message() {
        let value = body(payload(json!([]))).await;
        assert_eq!(value, json!({"status": "success", "payload": []}));
    }

    #[actix_web::test]
    async fn message_omits_payload() {
        let value = body(message("Pet adopted")).await;
        assert_eq!(value, json!({"status": "success", "message": "Pet adopted"}));
    }

    #[actix_web::test]
    async fn message_with_payload_keeps_both() {
        let value = body(message_with_payload("done", json!({"n": 1}))).await;
        assert_eq!(value["message"], "done");
        assert_eq!(value["payload"]["n"], 1);
    }
}
