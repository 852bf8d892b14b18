mod list {
    use actix_web::http::StatusCode;
    use actix_web::test;
    use pokedex_rs::models::pokemon::Pokemon;
    use serial_test::file_serial;

    use crate::init_test_service;
    use crate::integration_helpers::factories::pokemon::insert_pokemon;
    use crate::integration_helpers::factories::user::{bearer, create_user, issue_token};

    #[test_log::test(actix_web::test)]
    #[file_serial(pokedex_db)]
    async fn test_without_token() {
        init_test_service!(app, service);

        let req = test::TestRequest::with_uri("/api/pokemons").to_request();
        let response = test::call_service(&service, req).await;

        assert_eq!(StatusCode::UNAUTHORIZED, response.status());
        assert!(response.headers().contains_key("www-authenticate"));
    }

    #[test_log::test(actix_web::test)]
    #[file_serial(pokedex_db)]
    async fn test_with_invalid_token() {
        init_test_service!(app, service);

        let req = test::TestRequest::with_uri("/api/pokemons")
            .insert_header(bearer("not-a-real-token"))
            .to_request();
        let response = test::call_service(&service, req).await;

        assert_eq!(StatusCode::UNAUTHORIZED, response.status());
    }

    #[test_log::test(actix_web::test)]
    #[file_serial(pokedex_db)]
    async fn test_with_read_only_token() {
        init_test_service!(app, service);
        let user = create_user(&app, "misty").await;
        let token = issue_token(&app, &user, "read").await;

        let req = test::TestRequest::with_uri("/api/pokemons")
            .insert_header(bearer(&token))
            .to_request();
        let response = test::call_service(&service, req).await;

        assert_eq!(StatusCode::FORBIDDEN, response.status());
    }

    #[test_log::test(actix_web::test)]
    #[file_serial(pokedex_db)]
    async fn test_with_token() {
        init_test_service!(app, service);
        let user = create_user(&app, "brock").await;
        let token = issue_token(&app, &user, "read write").await;
        let pikachu = insert_pokemon(&app, "Pikachu", None).await;
        let raichu = insert_pokemon(&app, "Raichu", None).await;

        let req = test::TestRequest::with_uri("/api/pokemons")
            .insert_header(bearer(&token))
            .to_request();
        let pokemons: Vec<Pokemon> = test::call_and_read_body_json(&service, req).await;

        assert_eq!(vec![pikachu, raichu], pokemons);
    }
}

mod get {
    use actix_web::http::StatusCode;
    use actix_web::test;
    use pokedex_rs::models::pokemon::Pokemon;
    use serial_test::file_serial;

    use crate::init_test_service;
    use crate::integration_helpers::factories::pokemon::insert_pokemon;
    use crate::integration_helpers::factories::user::{bearer, create_user, issue_token};

    #[test_log::test(actix_web::test)]
    #[file_serial(pokedex_db)]
    async fn test_existing() {
        init_test_service!(app, service);
        let user = create_user(&app, "brock").await;
        let token = issue_token(&app, &user, "read write").await;
        let pikachu = insert_pokemon(&app, "Pikachu", None).await;

        let req = test::TestRequest::with_uri(&format!("/api/pokemons/{}", pikachu.id))
            .insert_header(bearer(&token))
            .to_request();
        let pokemon: Pokemon = test::call_and_read_body_json(&service, req).await;

        assert_eq!(pikachu, pokemon);
        assert_eq!(Some("pokemon/existing.png".to_string()), pokemon.picture);
    }

    #[test_log::test(actix_web::test)]
    #[file_serial(pokedex_db)]
    async fn test_not_found() {
        init_test_service!(app, service);
        let user = create_user(&app, "brock").await;
        let token = issue_token(&app, &user, "read write").await;

        let req = test::TestRequest::with_uri("/api/pokemons/424242")
            .insert_header(bearer(&token))
            .to_request();
        let response = test::call_service(&service, req).await;

        assert_eq!(StatusCode::NOT_FOUND, response.status());
    }
}

mod create {
    use actix_web::http::StatusCode;
    use actix_web::test;
    use pokedex_rs::api::errors::ErrorResponse;
    use pokedex_rs::models::pokemon::Pokemon;
    use serde_json::json;
    use serial_test::file_serial;

    use crate::init_test_service;
    use crate::integration_helpers::factories::pokemon::{build_create_pokemon, decimal};
    use crate::integration_helpers::factories::trainer::insert_trainer;

    #[test_log::test(actix_web::test)]
    #[file_serial(pokedex_db)]
    async fn test_without_token() {
        init_test_service!(app, service);
        let ash = insert_trainer(&app, "Ash").await;

        let req = test::TestRequest::post()
            .uri("/api/pokemons")
            .set_json(build_create_pokemon("Pikachu", Some(ash.id)))
            .to_request();
        let response = test::call_service(&service, req).await;
        assert_eq!(StatusCode::CREATED, response.status());

        let pokemon: Pokemon = test::read_body_json(response).await;
        assert_eq!("Pikachu", pokemon.name);
        assert_eq!("Electric", pokemon.pokemon_type);
        assert_eq!(decimal("6.0000"), pokemon.weight);
        assert_eq!(Some(ash.id), pokemon.trainer_id);
        assert_eq!(None, pokemon.picture);
    }

    #[test_log::test(actix_web::test)]
    #[file_serial(pokedex_db)]
    async fn test_missing_fields() {
        init_test_service!(app, service);

        let req = test::TestRequest::post()
            .uri("/api/pokemons")
            .set_json(json!({ "name": "Pikachu" }))
            .to_request();
        let response = test::call_service(&service, req).await;
        assert_eq!(StatusCode::UNPROCESSABLE_ENTITY, response.status());

        let error: ErrorResponse = test::read_body_json(response).await;
        let field_errors = error.field_errors.unwrap();
        assert!(field_errors.contains_key("type"));
        assert!(field_errors.contains_key("weight"));
        assert!(field_errors.contains_key("height"));
        assert!(!field_errors.contains_key("name"));
    }

    #[test_log::test(actix_web::test)]
    #[file_serial(pokedex_db)]
    async fn test_unknown_trainer() {
        init_test_service!(app, service);

        let req = test::TestRequest::post()
            .uri("/api/pokemons")
            .set_json(build_create_pokemon("Pikachu", Some(424242)))
            .to_request();
        let response = test::call_service(&service, req).await;
        assert_eq!(StatusCode::UNPROCESSABLE_ENTITY, response.status());

        let error: ErrorResponse = test::read_body_json(response).await;
        assert!(error.field_errors.unwrap().contains_key("trainer"));
    }

    #[test_log::test(actix_web::test)]
    #[file_serial(pokedex_db)]
    async fn test_too_precise_weight() {
        init_test_service!(app, service);

        let req = test::TestRequest::post()
            .uri("/api/pokemons")
            .set_json(json!({
                "name": "Pikachu",
                "type": "Electric",
                "weight": "6.00001",
                "height": "0.4",
            }))
            .to_request();
        let response = test::call_service(&service, req).await;

        assert_eq!(StatusCode::UNPROCESSABLE_ENTITY, response.status());
    }

    #[test_log::test(actix_web::test)]
    #[file_serial(pokedex_db)]
    async fn test_malformed_body() {
        init_test_service!(app, service);

        let req = test::TestRequest::post()
            .uri("/api/pokemons")
            .insert_header(("Content-Type", "application/json"))
            .set_payload("{ \"name\": ")
            .to_request();
        let response = test::call_service(&service, req).await;

        assert_eq!(StatusCode::BAD_REQUEST, response.status());
    }

    #[test_log::test(actix_web::test)]
    #[file_serial(pokedex_db)]
    async fn test_unknown_field() {
        init_test_service!(app, service);

        let req = test::TestRequest::post()
            .uri("/api/pokemons")
            .set_json(json!({
                "name": "Pikachu",
                "type": "Electric",
                "weight": "6",
                "height": "0.4",
                "picture": "pokemon/hack.png",
            }))
            .to_request();
        let response = test::call_service(&service, req).await;

        assert_eq!(StatusCode::BAD_REQUEST, response.status());
    }
}

mod update {
    use actix_web::test;
    use pokedex_rs::models::pokemon::{Pokemon, UpdatePokemon};
    use serial_test::file_serial;

    use crate::init_test_service;
    use crate::integration_helpers::factories::pokemon::{build_create_pokemon, insert_pokemon};
    use crate::integration_helpers::factories::trainer::insert_trainer;

    #[test_log::test(actix_web::test)]
    #[file_serial(pokedex_db)]
    async fn test_keeps_picture() {
        init_test_service!(app, service);
        let ash = insert_trainer(&app, "Ash").await;
        let pikachu = insert_pokemon(&app, "Pikachu", Some(ash.id)).await;

        let update: UpdatePokemon = build_create_pokemon("Raichu", None).into();
        let req = test::TestRequest::put()
            .uri(&format!("/api/pokemons/{}", pikachu.id))
            .set_json(update)
            .to_request();
        let pokemon: Pokemon = test::call_and_read_body_json(&service, req).await;

        assert_eq!(pikachu.id, pokemon.id);
        assert_eq!("Raichu", pokemon.name);
        assert_eq!(None, pokemon.trainer_id);
        assert_eq!(pikachu.picture, pokemon.picture);
    }
}

mod patch {
    use actix_web::test;
    use pokedex_rs::models::pokemon::Pokemon;
    use serde_json::json;
    use serial_test::file_serial;

    use crate::init_test_service;
    use crate::integration_helpers::factories::pokemon::{decimal, insert_pokemon};
    use crate::integration_helpers::factories::trainer::insert_trainer;

    #[test_log::test(actix_web::test)]
    #[file_serial(pokedex_db)]
    async fn test_some_fields() {
        init_test_service!(app, service);
        let ash = insert_trainer(&app, "Ash").await;
        let pikachu = insert_pokemon(&app, "Pikachu", Some(ash.id)).await;

        let req = test::TestRequest::patch()
            .uri(&format!("/api/pokemons/{}", pikachu.id))
            .set_json(json!({ "weight": "6.5", "trainer": null }))
            .to_request();
        let pokemon: Pokemon = test::call_and_read_body_json(&service, req).await;

        assert_eq!("Pikachu", pokemon.name);
        assert_eq!(decimal("6.5"), pokemon.weight);
        assert_eq!(None, pokemon.trainer_id);
    }

    #[test_log::test(actix_web::test)]
    #[file_serial(pokedex_db)]
    async fn test_empty_patch() {
        init_test_service!(app, service);
        let pikachu = insert_pokemon(&app, "Pikachu", None).await;

        let req = test::TestRequest::patch()
            .uri(&format!("/api/pokemons/{}", pikachu.id))
            .set_json(json!({}))
            .to_request();
        let pokemon: Pokemon = test::call_and_read_body_json(&service, req).await;

        assert_eq!(pikachu, pokemon);
    }
}

mod delete {
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serial_test::file_serial;

    use crate::init_test_service;
    use crate::integration_helpers::factories::pokemon::insert_pokemon;

    #[test_log::test(actix_web::test)]
    #[file_serial(pokedex_db)]
    async fn test_existing_then_missing() {
        init_test_service!(app, service);
        let pikachu = insert_pokemon(&app, "Pikachu", None).await;
        let uri = format!("/api/pokemons/{}", pikachu.id);

        let req = test::TestRequest::delete().uri(&uri).to_request();
        let response = test::call_service(&service, req).await;
        assert_eq!(StatusCode::NO_CONTENT, response.status());

        let req = test::TestRequest::delete().uri(&uri).to_request();
        let response = test::call_service(&service, req).await;
        assert_eq!(StatusCode::NOT_FOUND, response.status());
    }
}

mod trailing_slash {
    use actix_web::http::StatusCode;
    use actix_web::test;
    use pokedex_rs::models::pokemon::Pokemon;
    use serial_test::file_serial;

    use crate::init_test_service;
    use crate::integration_helpers::factories::pokemon::{build_create_pokemon, insert_pokemon};
    use crate::integration_helpers::factories::user::{bearer, create_user, issue_token};

    #[test_log::test(actix_web::test)]
    #[file_serial(pokedex_db)]
    async fn test_collection() {
        init_test_service!(app, service);
        let user = create_user(&app, "brock").await;
        let token = issue_token(&app, &user, "read write").await;

        let req = test::TestRequest::post()
            .uri("/api/pokemons/")
            .set_json(build_create_pokemon("Pikachu", None))
            .to_request();
        let response = test::call_service(&service, req).await;
        assert_eq!(StatusCode::CREATED, response.status());
        let pikachu: Pokemon = test::read_body_json(response).await;

        let req = test::TestRequest::with_uri("/api/pokemons/")
            .insert_header(bearer(&token))
            .to_request();
        let pokemons: Vec<Pokemon> = test::call_and_read_body_json(&service, req).await;
        assert_eq!(vec![pikachu], pokemons);
    }

    #[test_log::test(actix_web::test)]
    #[file_serial(pokedex_db)]
    async fn test_entity() {
        init_test_service!(app, service);
        let user = create_user(&app, "brock").await;
        let token = issue_token(&app, &user, "read write").await;
        let pikachu = insert_pokemon(&app, "Pikachu", None).await;
        let uri = format!("/api/pokemons/{}/", pikachu.id);

        let req = test::TestRequest::with_uri(&uri)
            .insert_header(bearer(&token))
            .to_request();
        let pokemon: Pokemon = test::call_and_read_body_json(&service, req).await;
        assert_eq!(pikachu, pokemon);

        let req = test::TestRequest::delete().uri(&uri).to_request();
        let response = test::call_service(&service, req).await;
        assert_eq!(StatusCode::NO_CONTENT, response.status());
    }

    #[test_log::test(actix_web::test)]
    #[file_serial(pokedex_db)]
    async fn test_malformed_body() {
        init_test_service!(app, service);

        let req = test::TestRequest::post()
            .uri("/api/pokemons/")
            .insert_header(("content-type", "application/json"))
            .set_payload("{ not json")
            .to_request();
        let response = test::call_service(&service, req).await;

        assert_eq!(StatusCode::BAD_REQUEST, response.status());
    }
}
