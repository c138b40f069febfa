use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures::future::{Ready, ready};

use crate::error::AppError;

pub const EMAIL_HEADER: &str = "email";
pub const PASSWORD_HEADER: &str = "password";

/// Raw `email` / `password` headers. Every protected call carries them;
/// there is no session or token.
#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl FromRequest for Credentials {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let header = |name: &str| {
            req.headers()
                .get(name)
                .and_then(|h| std::str::from_utf8(h.as_bytes()).ok())
                .map(str::to_string)
        };

        match (header(EMAIL_HEADER), header(PASSWORD_HEADER)) {
            (Some(email), Some(password)) => ready(Ok(Credentials { email, password })),
            _ => ready(Err(AppError::Unauthorized)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::header::HeaderValue, test::TestRequest};

    #[actix_web::test]
    async fn reads_both_headers() {
        let req = TestRequest::default()
            .insert_header((EMAIL_HEADER, "a@x.com"))
            .insert_header((PASSWORD_HEADER, "p1"))
            .to_http_request();

        let creds = Credentials::extract(&req).await.unwrap();
        assert_eq!(creds.email, "a@x.com");
        assert_eq!(creds.password, "p1");
    }

    #[actix_web::test]
    async fn utf8_header_bytes_are_decoded() {
        let req = TestRequest::default()
            .insert_header((EMAIL_HEADER, "a@x.com"))
            .insert_header((
                PASSWORD_HEADER,
                HeaderValue::from_bytes("pässwörd".as_bytes()).unwrap(),
            ))
            .to_http_request();

        let creds = Credentials::extract(&req).await.unwrap();
        assert_eq!(creds.password, "pässwörd");
    }

    #[actix_web::test]
    async fn non_utf8_header_is_unauthorized() {
        let req = TestRequest::default()
            .insert_header((EMAIL_HEADER, "a@x.com"))
            .insert_header((PASSWORD_HEADER, HeaderValue::from_bytes(&[0xff, 0xfe]).unwrap()))
            .to_http_request();

        assert!(matches!(
            Credentials::extract(&req).await,
            Err(AppError::Unauthorized)
        ));
    }

    #[actix_web::test]
    async fn missing_password_is_unauthorized() {
        let req = TestRequest::default()
            .insert_header((EMAIL_HEADER, "a@x.com"))
            .to_http_request();

        assert!(matches!(
            Credentials::extract(&req).await,
            Err(AppError::Unauthorized)
        ));
    }
}
