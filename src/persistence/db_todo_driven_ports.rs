use crate::domain;
use crate::domain::todo::{NewTodo, TodoItem, UpdateTodo};
use crate::external_connections::{ConnectionHandle, ExternalConnectivity};
use anyhow::{Context, Error};
use sqlx::FromRow;

/// Reads to-do items out of the todo_item table
pub struct DbTodoReader;

#[derive(FromRow)]
struct TodoItemRow {
    id: i64,
    title: String,
    description: String,
    completed: bool,
}

impl From<TodoItemRow> for TodoItem {
    fn from(value: TodoItemRow) -> Self {
        TodoItem {
            id: value.id,
            title: value.title,
            description: value.description,
            completed: value.completed,
        }
    }
}

impl domain::todo::driven_ports::TodoReader for DbTodoReader {
    async fn all(&self, ext_cxn: &mut impl ExternalConnectivity) -> Result<Vec<TodoItem>, Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        let todo_items: Vec<TodoItem> = sqlx::query_as::<_, TodoItemRow>(
            "SELECT ti.id, ti.title, ti.description, ti.completed FROM todo_item ti",
        )
        .fetch_all(cxn.borrow_connection())
        .await
        .context("trying to fetch all to-do items")?
        .into_iter()
        .map(TodoItem::from)
        .collect();

        Ok(todo_items)
    }

    async fn by_id(
        &self,
        todo_id: i64,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<Option<TodoItem>, Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        let todo_item: Option<TodoItem> = sqlx::query_as::<_, TodoItemRow>(
            "SELECT ti.id, ti.title, ti.description, ti.completed FROM todo_item ti WHERE ti.id = ?",
        )
        .bind(todo_id)
        .fetch_optional(cxn.borrow_connection())
        .await
        .context("trying to fetch a to-do item by ID")?
        .map(TodoItem::from);

        Ok(todo_item)
    }
}

/// Writes to-do items into the todo_item table
pub struct DbTodoWriter;

impl domain::todo::driven_ports::TodoWriter for DbTodoWriter {
    async fn create(
        &self,
        new_todo: &NewTodo,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<i64, Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        let new_id: super::NewId =
            sqlx::query_as("INSERT INTO todo_item(title, description) VALUES (?, ?) RETURNING id")
                .bind(&new_todo.title)
                .bind(&new_todo.description)
                .fetch_one(cxn.borrow_connection())
                .await
                .context("trying to insert a new to-do item into the database")?;

        Ok(new_id.id)
    }

    async fn update(
        &self,
        todo_id: i64,
        update: &UpdateTodo,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<(), Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        // Only title and description may change, completed stays as-is
        sqlx::query("UPDATE todo_item SET title = ?, description = ? WHERE id = ?")
            .bind(&update.title)
            .bind(&update.description)
            .bind(todo_id)
            .execute(cxn.borrow_connection())
            .await
            .context("trying to update a to-do item in the database")?;

        Ok(())
    }

    async fn delete(
        &self,
        todo_id: i64,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<(), Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        sqlx::query("DELETE FROM todo_item WHERE id = ?")
            .bind(todo_id)
            .execute(cxn.borrow_connection())
            .await
            .context("trying to remove a to-do item from the database")?;

        Ok(())
    }
}
