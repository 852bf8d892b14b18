mod index {
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serial_test::file_serial;

    use crate::init_test_service;
    use crate::integration_helpers::factories::pokemon::insert_pokemon;
    use crate::integration_helpers::factories::trainer::insert_trainer;
    use crate::integration_helpers::read_body_string;

    #[test_log::test(actix_web::test)]
    #[file_serial(pokedex_db)]
    async fn test_anonymous() {
        init_test_service!(app, service);
        let ash = insert_trainer(&app, "Ash").await;
        let pikachu = insert_pokemon(&app, "Pikachu", Some(ash.id)).await;

        let req = test::TestRequest::with_uri("/").to_request();
        let response = test::call_service(&service, req).await;
        assert_eq!(StatusCode::OK, response.status());

        let body = read_body_string(response).await;
        assert!(body.contains(&format!("href=\"/pokemon/{}\"", pikachu.id)));
        assert!(body.contains("Pikachu"));
        assert!(body.contains(&format!("href=\"/trainer/{}\"", ash.id)));
        assert!(body.contains("href=\"/accounts/login\""));
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
    async fn test_with_trainer() {
        init_test_service!(app, service);
        let ash = insert_trainer(&app, "Ash").await;
        let pikachu = insert_pokemon(&app, "Pikachu", Some(ash.id)).await;

        let req = test::TestRequest::with_uri(&format!("/pokemon/{}", pikachu.id)).to_request();
        let response = test::call_service(&service, req).await;
        assert_eq!(StatusCode::OK, response.status());

        let body = read_body_string(response).await;
        assert!(body.contains("Ash Ketchum"));
        assert!(body.contains("src=\"/media/"));
        assert!(body.contains("existing.png"));
    }

    #[test_log::test(actix_web::test)]
    #[file_serial(pokedex_db)]
    async fn test_not_found() {
        init_test_service!(app, service);

        let req = test::TestRequest::with_uri("/pokemon/424242").to_request();
        let response = test::call_service(&service, req).await;
        assert_eq!(StatusCode::NOT_FOUND, response.status());

        let body = read_body_string(response).await;
        assert!(body.contains("Not Found"));
    }
}

mod add {
    use actix_web::http::header::CONTENT_TYPE;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use pokedex_rs::forms::INVALID_IMAGE_MESSAGE;
    use pokedex_rs::services::{pokemon, Repository};
    use serial_test::file_serial;

    use crate::init_test_service;
    use crate::integration_helpers::factories::pokemon::{decimal, PNG_PIXEL};
    use crate::integration_helpers::factories::trainer::insert_trainer;
    use crate::integration_helpers::factories::user::create_user;
    use crate::integration_helpers::multipart::MultipartBody;
    use crate::integration_helpers::{location, read_body_string};

    #[test_log::test(actix_web::test)]
    #[file_serial(pokedex_db)]
    async fn test_requires_login() {
        init_test_service!(app, service);

        let req = test::TestRequest::with_uri("/pokemon/add").to_request();
        let response = test::call_service(&service, req).await;

        assert_eq!(StatusCode::FOUND, response.status());
        assert_eq!(Some("/accounts/login?next=%2Fpokemon%2Fadd"), location(&response));
    }

    #[test_log::test(actix_web::test)]
    #[file_serial(pokedex_db)]
    async fn test_form() {
        init_test_service!(app, service);
        let user = create_user(&app, "ash").await;
        let ash = insert_trainer(&app, "Ash").await;

        let req = test::TestRequest::with_uri("/pokemon/add")
            .cookie(app.session_cookie(&user))
            .to_request();
        let response = test::call_service(&service, req).await;
        assert_eq!(StatusCode::OK, response.status());

        let body = read_body_string(response).await;
        assert!(body.contains("enctype=\"multipart/form-data\""));
        assert!(body.contains(&format!("<option value=\"{}\">Ash Ketchum</option>", ash.id)));
        assert!(body.contains("<option value=\"Electric\">"));
    }

    #[test_log::test(actix_web::test)]
    #[file_serial(pokedex_db)]
    async fn test_with_picture() {
        init_test_service!(app, service);
        let user = create_user(&app, "ash").await;
        let ash = insert_trainer(&app, "Ash").await;

        let body = MultipartBody::new()
            .text("name", "Pikachu")
            .text("type", "Electric")
            .text("weight", "6")
            .text("height", "0.4")
            .text("trainer", &ash.id.to_string())
            .file("picture", "pikachu.png", "image/png", PNG_PIXEL)
            .build();
        let req = test::TestRequest::post()
            .uri("/pokemon/add")
            .cookie(app.session_cookie(&user))
            .insert_header((CONTENT_TYPE, MultipartBody::content_type()))
            .set_payload(body)
            .to_request();
        let response = test::call_service(&service, req).await;
        assert_eq!(StatusCode::FOUND, response.status());
        assert_eq!(Some("/"), location(&response));

        let pokemons = pokemon::Service::new(app.get_pool()).list().await.unwrap();
        assert_eq!(1, pokemons.len());
        let pokemon = &pokemons[0];
        assert_eq!("Pikachu", pokemon.name);
        assert_eq!(decimal("6"), pokemon.weight);
        assert_eq!(Some(ash.id), pokemon.trainer_id);

        let picture = pokemon.picture.as_deref().unwrap();
        assert!(picture.starts_with("pokemon/"));
        assert!(picture.ends_with(".png"));
        assert_eq!(PNG_PIXEL, std::fs::read(app.media_root().join(picture)).unwrap());

        let req = test::TestRequest::with_uri(&format!("/media/{}", picture)).to_request();
        let response = test::call_service(&service, req).await;
        assert_eq!(StatusCode::OK, response.status());
        assert_eq!(
            Some("image/png"),
            response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
        );
    }

    #[test_log::test(actix_web::test)]
    #[file_serial(pokedex_db)]
    async fn test_missing_fields() {
        init_test_service!(app, service);
        let user = create_user(&app, "ash").await;

        let body = MultipartBody::new()
            .text("name", "Pikachu")
            .text("type", "Electric")
            .text("weight", "6")
            .file("picture", "pikachu.png", "image/png", PNG_PIXEL)
            .build();
        let req = test::TestRequest::post()
            .uri("/pokemon/add")
            .cookie(app.session_cookie(&user))
            .insert_header((CONTENT_TYPE, MultipartBody::content_type()))
            .set_payload(body)
            .to_request();
        let response = test::call_service(&service, req).await;
        assert_eq!(StatusCode::OK, response.status());

        let body = read_body_string(response).await;
        assert!(body.contains("This field is required."));
        assert!(body.contains("value=\"Pikachu\""));

        let pokemons = pokemon::Service::new(app.get_pool()).list().await.unwrap();
        assert!(pokemons.is_empty());
    }

    #[test_log::test(actix_web::test)]
    #[file_serial(pokedex_db)]
    async fn test_invalid_picture() {
        init_test_service!(app, service);
        let user = create_user(&app, "ash").await;

        let body = MultipartBody::new()
            .text("name", "Pikachu")
            .text("type", "Electric")
            .text("weight", "6")
            .text("height", "0.4")
            .file("picture", "pikachu.png", "image/png", b"\x89PNG\r\n\x1a\n")
            .build();
        let req = test::TestRequest::post()
            .uri("/pokemon/add")
            .cookie(app.session_cookie(&user))
            .insert_header((CONTENT_TYPE, MultipartBody::content_type()))
            .set_payload(body)
            .to_request();
        let response = test::call_service(&service, req).await;
        assert_eq!(StatusCode::OK, response.status());

        let body = read_body_string(response).await;
        assert!(body.contains(INVALID_IMAGE_MESSAGE));

        let pokemons = pokemon::Service::new(app.get_pool()).list().await.unwrap();
        assert!(pokemons.is_empty());
        assert!(!app.media_root().join("pokemon").exists());
    }
}

mod edit {
    use actix_web::http::header::CONTENT_TYPE;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use pokedex_rs::services::{pokemon, Repository};
    use serial_test::file_serial;

    use crate::init_test_service;
    use crate::integration_helpers::factories::pokemon::insert_pokemon;
    use crate::integration_helpers::factories::user::create_user;
    use crate::integration_helpers::multipart::MultipartBody;
    use crate::integration_helpers::{location, read_body_string};

    #[test_log::test(actix_web::test)]
    #[file_serial(pokedex_db)]
    async fn test_form_is_prefilled() {
        init_test_service!(app, service);
        let user = create_user(&app, "ash").await;
        let pikachu = insert_pokemon(&app, "Pikachu", None).await;

        let req = test::TestRequest::with_uri(&format!("/pokemon/{}/edit", pikachu.id))
            .cookie(app.session_cookie(&user))
            .to_request();
        let response = test::call_service(&service, req).await;
        assert_eq!(StatusCode::OK, response.status());

        let body = read_body_string(response).await;
        assert!(body.contains("value=\"Pikachu\""));
        assert!(body.contains(&format!("action=\"/pokemon/{}/edit\"", pikachu.id)));
        assert!(body.contains("existing.png"));
    }

    #[test_log::test(actix_web::test)]
    #[file_serial(pokedex_db)]
    async fn test_keeps_picture() {
        init_test_service!(app, service);
        let user = create_user(&app, "ash").await;
        let pikachu = insert_pokemon(&app, "Pikachu", None).await;

        let body = MultipartBody::new()
            .text("name", "Raichu")
            .text("type", "Electric")
            .text("weight", "30")
            .text("height", "0.8")
            .text("trainer", "")
            .build();
        let req = test::TestRequest::post()
            .uri(&format!("/pokemon/{}/edit", pikachu.id))
            .cookie(app.session_cookie(&user))
            .insert_header((CONTENT_TYPE, MultipartBody::content_type()))
            .set_payload(body)
            .to_request();
        let response = test::call_service(&service, req).await;
        assert_eq!(StatusCode::FOUND, response.status());
        assert_eq!(Some("/"), location(&response));

        let pokemon = pokemon::Service::new(app.get_pool())
            .get(pikachu.id)
            .await
            .unwrap();
        assert_eq!("Raichu", pokemon.name);
        assert_eq!(pikachu.picture, pokemon.picture);
    }
}

mod delete {
    use actix_web::http::StatusCode;
    use actix_web::test;
    use pokedex_rs::services::{pokemon, Repository};
    use serial_test::file_serial;

    use crate::init_test_service;
    use crate::integration_helpers::factories::pokemon::insert_pokemon;
    use crate::integration_helpers::factories::user::create_user;
    use crate::integration_helpers::location;

    #[test_log::test(actix_web::test)]
    #[file_serial(pokedex_db)]
    async fn test_requires_login() {
        init_test_service!(app, service);
        let pikachu = insert_pokemon(&app, "Pikachu", None).await;

        let req = test::TestRequest::with_uri(&format!("/pokemon/{}/delete", pikachu.id))
            .to_request();
        let response = test::call_service(&service, req).await;
        assert_eq!(StatusCode::FOUND, response.status());

        let pokemons = pokemon::Service::new(app.get_pool()).list().await.unwrap();
        assert_eq!(vec![pikachu], pokemons);
    }

    #[test_log::test(actix_web::test)]
    #[file_serial(pokedex_db)]
    async fn test_logged_in() {
        init_test_service!(app, service);
        let user = create_user(&app, "ash").await;
        let pikachu = insert_pokemon(&app, "Pikachu", None).await;

        let req = test::TestRequest::with_uri(&format!("/pokemon/{}/delete", pikachu.id))
            .cookie(app.session_cookie(&user))
            .to_request();
        let response = test::call_service(&service, req).await;
        assert_eq!(StatusCode::FOUND, response.status());
        assert_eq!(Some("/"), location(&response));

        let pokemons = pokemon::Service::new(app.get_pool()).list().await.unwrap();
        assert!(pokemons.is_empty());
    }
}
