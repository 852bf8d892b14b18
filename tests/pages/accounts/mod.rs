mod login {
    use actix_web::http::StatusCode;
    use actix_web::test;
    use pokedex_rs::auth::session::SESSION_COOKIE;
    use pokedex_rs::pages::accounts::INVALID_LOGIN_MESSAGE;
    use serial_test::file_serial;

    use crate::init_test_service;
    use crate::integration_helpers::factories::user::{create_user, PASSWORD};
    use crate::integration_helpers::{location, read_body_string};

    #[test_log::test(actix_web::test)]
    #[file_serial(pokedex_db)]
    async fn test_form_keeps_next() {
        init_test_service!(app, service);

        let req = test::TestRequest::with_uri("/accounts/login?next=%2Fpokemon%2Fadd").to_request();
        let response = test::call_service(&service, req).await;
        assert_eq!(StatusCode::OK, response.status());

        let body = read_body_string(response).await;
        assert!(body.contains("name=\"next\""));
        assert!(body.contains("pokemon&#x2f;add") || body.contains("pokemon/add"));
    }

    #[test_log::test(actix_web::test)]
    #[file_serial(pokedex_db)]
    async fn test_valid_credentials() {
        init_test_service!(app, service);
        create_user(&app, "ash").await;

        let req = test::TestRequest::post()
            .uri("/accounts/login")
            .set_form([("username", "ash"), ("password", PASSWORD), ("next", "/pokemon/add")])
            .to_request();
        let response = test::call_service(&service, req).await;
        assert_eq!(StatusCode::FOUND, response.status());
        assert_eq!(Some("/pokemon/add"), location(&response));

        let session = response
            .response()
            .cookies()
            .find(|cookie| cookie.name() == SESSION_COOKIE)
            .unwrap()
            .into_owned();
        assert_eq!(Some(true), session.http_only());

        let req = test::TestRequest::with_uri("/pokemon/add")
            .cookie(session)
            .to_request();
        let response = test::call_service(&service, req).await;
        assert_eq!(StatusCode::OK, response.status());
    }

    #[test_log::test(actix_web::test)]
    #[file_serial(pokedex_db)]
    async fn test_external_next_is_ignored() {
        init_test_service!(app, service);
        create_user(&app, "ash").await;

        let req = test::TestRequest::post()
            .uri("/accounts/login")
            .set_form([
                ("username", "ash"),
                ("password", PASSWORD),
                ("next", "https://evil.example.com/"),
            ])
            .to_request();
        let response = test::call_service(&service, req).await;

        assert_eq!(StatusCode::FOUND, response.status());
        assert_eq!(Some("/"), location(&response));
    }

    #[test_log::test(actix_web::test)]
    #[file_serial(pokedex_db)]
    async fn test_invalid_credentials() {
        init_test_service!(app, service);
        create_user(&app, "ash").await;

        let req = test::TestRequest::post()
            .uri("/accounts/login")
            .set_form([("username", "ash"), ("password", "wrong")])
            .to_request();
        let response = test::call_service(&service, req).await;
        assert_eq!(StatusCode::OK, response.status());
        assert!(response
            .response()
            .cookies()
            .all(|cookie| cookie.name() != SESSION_COOKIE));

        let body = read_body_string(response).await;
        assert!(body.contains(INVALID_LOGIN_MESSAGE));
    }
}

mod logout {
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serial_test::file_serial;

    use crate::init_test_service;
    use crate::integration_helpers::factories::user::create_user;
    use crate::integration_helpers::{location, read_body_string};

    #[test_log::test(actix_web::test)]
    #[file_serial(pokedex_db)]
    async fn test_logged_in() {
        init_test_service!(app, service);
        let user = create_user(&app, "ash").await;

        let req = test::TestRequest::with_uri("/")
            .cookie(app.session_cookie(&user))
            .to_request();
        let body = read_body_string(test::call_service(&service, req).await).await;
        assert!(body.contains("Logged in as ash"));

        let req = test::TestRequest::post()
            .uri("/accounts/logout")
            .cookie(app.session_cookie(&user))
            .to_request();
        let response = test::call_service(&service, req).await;
        assert_eq!(StatusCode::FOUND, response.status());
        assert_eq!(Some("/"), location(&response));
    }
}
