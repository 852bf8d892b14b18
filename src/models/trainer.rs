//! Models used to create/update/load trainers from the database.

use chrono::NaiveDate;
use diesel_derives::{AsChangeset, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use utoipa::{ToResponse, ToSchema};
use validator::Validate;

use crate::models::required;
use crate::schema::trainers;

#[cfg_attr(
    doc,
    doc = r"
        Base trainer entity model.

        Used to validate queries at compile time as well as load trainers from the database
        (including those returned by update queries).
    "
)]
#[cfg_attr(not(doc), doc = "Information about a Pokemon Trainer")]
#[derive(
    Debug, Clone, PartialEq, Eq, Queryable, Selectable, Serialize, Deserialize, ToSchema, ToResponse,
)]
#[diesel(table_name = trainers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(deny_unknown_fields)]
#[response(
    description = "Trainer information",
    example = json!({
        "id": 1,
        "first_name": "Ash",
        "last_name": "Ketchum",
        "birth_date": "1987-05-22",
        "level": 10
    }),
)]
pub struct Trainer {
    /// Unique id of this Trainer in the Pokedex database
    pub id: i64,

    /// Trainer first name
    #[schema(example = "Ash")]
    pub first_name: String,

    /// Trainer last name
    #[schema(example = "Ketchum")]
    pub last_name: String,

    /// Trainer birth date
    #[schema(example = "1987-05-22")]
    pub birth_date: NaiveDate,

    /// Trainer level (at least 1)
    #[schema(example = 10)]
    pub level: i32,
}

impl Trainer {
    /// Returns the trainer's full name, as displayed in pages.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg_attr(
    doc,
    doc = r"
        Model used to create or fully update a trainer in the database.

        All fields must be specified except for [`level`](UpsertTrainer::level): when creating a
        trainer, it defaults to 1; when updating one, the current level is kept.
    "
)]
#[cfg_attr(not(doc), doc = "Information to create or update a Pokemon Trainer")]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpsertTrainer {
    /// Trainer first name
    #[validate(
        required(message = "This field is required."),
        length(
            min = 1,
            max = 50,
            message = "Ensure this field has between 1 and 50 characters."
        )
    )]
    #[schema(example = "Ash", min_length = 1, max_length = 50)]
    pub first_name: Option<String>,

    /// Trainer last name
    #[validate(
        required(message = "This field is required."),
        length(
            min = 1,
            max = 50,
            message = "Ensure this field has between 1 and 50 characters."
        )
    )]
    #[schema(example = "Ketchum", min_length = 1, max_length = 50)]
    pub last_name: Option<String>,

    /// Trainer birth date
    #[validate(required(message = "This field is required."))]
    #[schema(example = "1987-05-22")]
    pub birth_date: Option<NaiveDate>,

    /// Trainer level (at least 1)
    #[serde(default)]
    #[validate(range(min = 1, message = "Ensure this value is greater than or equal to 1."))]
    #[schema(example = 10, minimum = 1)]
    pub level: Option<i32>,
}

impl From<Trainer> for UpsertTrainer {
    /// Converts a [`Trainer`] into an [`UpsertTrainer`], dropping its [`id`](Trainer::id).
    fn from(value: Trainer) -> Self {
        Self {
            first_name: Some(value.first_name),
            last_name: Some(value.last_name),
            birth_date: Some(value.birth_date),
            level: Some(value.level),
        }
    }
}

/// Trainer fields written to the database when a trainer is created or fully updated.
///
/// When [`level`](TrainerRecord::level) is `None`, the column is left alone: the database default
/// is used on insert and the current value is kept on update.
#[derive(Debug, Clone, PartialEq, Eq, Insertable, AsChangeset)]
#[diesel(table_name = trainers)]
pub struct TrainerRecord {
    /// Trainer first name
    pub first_name: String,

    /// Trainer last name
    pub last_name: String,

    /// Trainer birth date
    pub birth_date: NaiveDate,

    /// Trainer level
    pub level: Option<i32>,
}

impl TryFrom<UpsertTrainer> for TrainerRecord {
    type Error = crate::Error;

    /// Converts a validated [`UpsertTrainer`] into a record that can be written to the database.
    fn try_from(value: UpsertTrainer) -> crate::Result<Self> {
        Ok(Self {
            first_name: required("first_name", value.first_name)?,
            last_name: required("last_name", value.last_name)?,
            birth_date: required("birth_date", value.birth_date)?,
            level: value.level,
        })
    }
}

#[cfg_attr(
    doc,
    doc = r#"
        Model used to "patch" a trainer in the database, e.g. update some fields only.

        All fields are optional; fields that are not specified will not be updated.
    "#
)]
#[cfg_attr(not(doc), doc = "Information to update specific fields of a Pokemon Trainer")]
#[derive(
    Debug, Default, Clone, PartialEq, Eq, AsChangeset, Serialize, Deserialize, Validate, ToSchema,
)]
#[diesel(table_name = trainers)]
#[serde(deny_unknown_fields)]
#[schema(example = json!({
    "level": 11
}))]
pub struct PatchTrainer {
    /// Trainer first name
    #[validate(length(
        min = 1,
        max = 50,
        message = "Ensure this field has between 1 and 50 characters."
    ))]
    pub first_name: Option<String>,

    /// Trainer last name
    #[validate(length(
        min = 1,
        max = 50,
        message = "Ensure this field has between 1 and 50 characters."
    ))]
    pub last_name: Option<String>,

    /// Trainer birth date
    #[schema(example = "1987-05-22")]
    pub birth_date: Option<NaiveDate>,

    /// Trainer level (at least 1)
    #[validate(range(min = 1, message = "Ensure this value is greater than or equal to 1."))]
    #[schema(example = 11, minimum = 1)]
    pub level: Option<i32>,
}

impl PatchTrainer {
    /// Returns `true` if this patch does not update any field.
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.birth_date.is_none()
            && self.level.is_none()
    }
}

/// Model used to import trainers in the database from the seed CSV file.
///
/// Used by the `seed_db` command to seed the database initially.
#[derive(Debug, Clone, Insertable, Deserialize, Validate)]
#[diesel(table_name = trainers)]
#[allow(missing_docs)]
pub struct ImportTrainer {
    #[validate(length(min = 1, max = 50))]
    pub first_name: String,
    #[validate(length(min = 1, max = 50))]
    pub last_name: String,
    pub birth_date: NaiveDate,
    #[validate(range(min = 1))]
    pub level: i32,
}
