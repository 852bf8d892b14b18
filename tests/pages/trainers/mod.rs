mod list {
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serial_test::file_serial;

    use crate::init_test_service;
    use crate::integration_helpers::factories::trainer::insert_trainer;
    use crate::integration_helpers::read_body_string;

    #[test_log::test(actix_web::test)]
    #[file_serial(pokedex_db)]
    async fn test_with_trailing_slash() {
        init_test_service!(app, service);
        let ash = insert_trainer(&app, "Ash").await;

        let req = test::TestRequest::with_uri("/trainer/").to_request();
        let response = test::call_service(&service, req).await;
        assert_eq!(StatusCode::OK, response.status());

        let body = read_body_string(response).await;
        assert!(body.contains(&format!("href=\"/trainer/{}\"", ash.id)));
        assert!(body.contains("1987-05-22"));
    }
}

mod detail {
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serial_test::file_serial;

    use crate::init_test_service;
    use crate::integration_helpers::factories::pokemon::insert_pokemon;
    use crate::integration_helpers::factories::trainer::insert_trainer;
    use crate::integration_helpers::read_body_string;

    #[test_log::test(actix_web::test)]
    #[file_serial(pokedex_db)]
    async fn test_lists_own_pokemons() {
        init_test_service!(app, service);
        let ash = insert_trainer(&app, "Ash").await;
        let gary = insert_trainer(&app, "Gary").await;
        insert_pokemon(&app, "Pikachu", Some(ash.id)).await;
        insert_pokemon(&app, "Eevee", Some(gary.id)).await;

        let req = test::TestRequest::with_uri(&format!("/trainer/{}", ash.id)).to_request();
        let response = test::call_service(&service, req).await;
        assert_eq!(StatusCode::OK, response.status());

        let body = read_body_string(response).await;
        assert!(body.contains("Pikachu"));
        assert!(!body.contains("Eevee"));
    }

    #[test_log::test(actix_web::test)]
    #[file_serial(pokedex_db)]
    async fn test_not_found() {
        init_test_service!(app, service);

        let req = test::TestRequest::with_uri("/trainer/424242").to_request();
        let response = test::call_service(&service, req).await;

        assert_eq!(StatusCode::NOT_FOUND, response.status());
    }
}
