use crate::domain;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// DTO for creating a to-do item, both via the API and the add form
#[derive(Deserialize, Display, ToSchema)]
#[cfg_attr(test, derive(Serialize, Clone))]
#[display("{title}")]
pub struct NewTodo {
    #[schema(example = "Buy milk")]
    pub title: String,
    #[schema(example = "2%, from the corner store")]
    pub description: String,
}

impl From<NewTodo> for domain::todo::NewTodo {
    fn from(value: NewTodo) -> Self {
        domain::todo::NewTodo {
            title: value.title,
            description: value.description,
        }
    }
}

/// DTO for updating a to-do item's content via the API
#[derive(Deserialize, ToSchema)]
#[cfg_attr(test, derive(Serialize))]
pub struct UpdateTodo {
    pub title: String,
    pub description: String,
}

impl From<UpdateTodo> for domain::todo::UpdateTodo {
    fn from(value: UpdateTodo) -> Self {
        domain::todo::UpdateTodo {
            title: value.title,
            description: value.description,
        }
    }
}

/// DTO for a returned to-do item, also fed to the listing page template
#[derive(Serialize, ToSchema)]
#[cfg_attr(test, derive(Deserialize, Debug, PartialEq, Eq))]
pub struct TodoItem {
    #[schema(example = 10)]
    pub id: i64,
    #[schema(example = "Buy milk")]
    pub title: String,
    #[schema(example = "2%, from the corner store")]
    pub description: String,
    pub completed: bool,
}

impl From<domain::todo::TodoItem> for TodoItem {
    fn from(value: domain::todo::TodoItem) -> Self {
        TodoItem {
            id: value.id,
            title: value.title,
            description: value.description,
            completed: value.completed,
        }
    }
}

/// DTO acknowledging a successful deletion
#[derive(Serialize, ToSchema)]
#[cfg_attr(test, derive(Deserialize))]
pub struct DeletedTodo {
    #[schema(example = "ToDo deleted")]
    pub message: String,
}

/// DTO greeting API consumers at the service root
#[derive(Serialize, ToSchema)]
#[cfg_attr(test, derive(Deserialize))]
pub struct Welcome {
    #[schema(example = "Welcome to ToDo API")]
    pub message: String,
}
