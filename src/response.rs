use actix_web::HttpResponse;
use serde::Serialize;

/// Uniform success envelope for every endpoint.
#[derive(Serialize)]
pub(crate) struct ApiResponse<T: Serialize> {
    pub code: u16,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(payload: T) -> HttpResponse {
        HttpResponse::Ok().json(Self {
            code: 200,
            message: "success",
            payload: Some(payload),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_wraps_the_payload() {
        let body = ApiResponse {
            code: 200,
            message: "success",
            payload: Some(vec![1, 2, 3]),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["code"], 200);
        assert_eq!(json["payload"], serde_json::json!([1, 2, 3]));
    }
}
