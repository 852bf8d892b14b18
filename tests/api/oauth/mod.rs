mod token {
    use actix_web::http::StatusCode;
    use actix_web::test;
    use pokedex_rs::api::oauth::{OAuthErrorCode, OAuthErrorResponse, TokenResponse};
    use serial_test::file_serial;

    use crate::init_test_service;
    use crate::integration_helpers::factories::user::{bearer, create_user, PASSWORD};

    fn token_request(form: &[(&str, &str)]) -> actix_http::Request {
        test::TestRequest::post()
            .uri("/o/token")
            .set_form(form)
            .to_request()
    }

    #[test_log::test(actix_web::test)]
    #[file_serial(pokedex_db)]
    async fn test_password_grant() {
        init_test_service!(app, service);
        create_user(&app, "ash").await;

        let req = token_request(&[
            ("grant_type", "password"),
            ("username", "ash"),
            ("password", PASSWORD),
            ("client_id", "pokedex-cli"),
        ]);
        let response = test::call_service(&service, req).await;
        assert_eq!(StatusCode::OK, response.status());

        let token: TokenResponse = test::read_body_json(response).await;
        assert_eq!("Bearer", token.token_type);
        assert_eq!("read write", token.scope);
        assert!(token.expires_in > 0);

        let req = test::TestRequest::with_uri("/api/pokemons")
            .insert_header(bearer(&token.access_token))
            .to_request();
        let response = test::call_service(&service, req).await;
        assert_eq!(StatusCode::OK, response.status());
    }

    #[test_log::test(actix_web::test)]
    #[file_serial(pokedex_db)]
    async fn test_read_scope_only() {
        init_test_service!(app, service);
        create_user(&app, "ash").await;

        let req = token_request(&[
            ("grant_type", "password"),
            ("username", "ash"),
            ("password", PASSWORD),
            ("scope", "read"),
        ]);
        let token: TokenResponse = test::call_and_read_body_json(&service, req).await;
        assert_eq!("read", token.scope);

        let req = test::TestRequest::with_uri("/api/pokemons")
            .insert_header(bearer(&token.access_token))
            .to_request();
        let response = test::call_service(&service, req).await;
        assert_eq!(StatusCode::FORBIDDEN, response.status());
    }

    #[test_log::test(actix_web::test)]
    #[file_serial(pokedex_db)]
    async fn test_wrong_password() {
        init_test_service!(app, service);
        create_user(&app, "ash").await;

        let req = token_request(&[
            ("grant_type", "password"),
            ("username", "ash"),
            ("password", "wrong"),
        ]);
        let response = test::call_service(&service, req).await;
        assert_eq!(StatusCode::BAD_REQUEST, response.status());

        let error: OAuthErrorResponse = test::read_body_json(response).await;
        assert_eq!(OAuthErrorCode::InvalidGrant, error.error);
    }

    #[test_log::test(actix_web::test)]
    #[file_serial(pokedex_db)]
    async fn test_unsupported_grant_type() {
        init_test_service!(app, service);

        let req = token_request(&[("grant_type", "client_credentials")]);
        let response = test::call_service(&service, req).await;
        assert_eq!(StatusCode::BAD_REQUEST, response.status());

        let error: OAuthErrorResponse = test::read_body_json(response).await;
        assert_eq!(OAuthErrorCode::UnsupportedGrantType, error.error);
    }
}

mod revoke_token {
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serial_test::file_serial;

    use crate::init_test_service;
    use crate::integration_helpers::factories::user::{bearer, create_user, issue_token};

    #[test_log::test(actix_web::test)]
    #[file_serial(pokedex_db)]
    async fn test_revoked_token_is_rejected() {
        init_test_service!(app, service);
        let user = create_user(&app, "ash").await;
        let token = issue_token(&app, &user, "read write").await;

        let req = test::TestRequest::post()
            .uri("/o/revoke_token")
            .set_form([("token", token.as_str())])
            .to_request();
        let response = test::call_service(&service, req).await;
        assert_eq!(StatusCode::OK, response.status());

        let req = test::TestRequest::with_uri("/api/trainers")
            .insert_header(bearer(&token))
            .to_request();
        let response = test::call_service(&service, req).await;
        assert_eq!(StatusCode::UNAUTHORIZED, response.status());
    }

    #[test_log::test(actix_web::test)]
    #[file_serial(pokedex_db)]
    async fn test_missing_token() {
        init_test_service!(app, service);

        let req = test::TestRequest::post()
            .uri("/o/revoke_token")
            .set_form([("token_type_hint", "access_token")])
            .to_request();
        let response = test::call_service(&service, req).await;

        assert_eq!(StatusCode::BAD_REQUEST, response.status());
    }

    #[test_log::test(actix_web::test)]
    #[file_serial(pokedex_db)]
    async fn test_unknown_token() {
        init_test_service!(app, service);

        let req = test::TestRequest::post()
            .uri("/o/revoke_token")
            .set_form([("token", "never-issued")])
            .to_request();
        let response = test::call_service(&service, req).await;

        assert_eq!(StatusCode::OK, response.status());
    }
}
