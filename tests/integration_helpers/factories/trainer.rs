use chrono::NaiveDate;
use pokedex_rs::models::trainer::{Trainer, TrainerRecord, UpsertTrainer};
use pokedex_rs::services::{trainer, Repository};
use validator::Validate;

use crate::integration_helpers::app::TestApp;

pub fn build_upsert_trainer(first_name: &str) -> UpsertTrainer {
    let upsert_trainer = UpsertTrainer {
        first_name: Some(first_name.into()),
        last_name: Some("Ketchum".into()),
        birth_date: NaiveDate::from_ymd_opt(1987, 5, 22),
        level: Some(10),
    };

    upsert_trainer.validate().unwrap();
    upsert_trainer
}

pub async fn insert_trainer(app: &TestApp, first_name: &str) -> Trainer {
    let record = TrainerRecord::try_from(build_upsert_trainer(first_name)).unwrap();

    trainer::Service::new(app.get_pool())
        .create(&record)
        .await
        .unwrap()
}
