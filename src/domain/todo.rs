use crate::domain::todo::driven_ports::{TodoReader, TodoWriter};
use crate::domain::todo::driving_ports::TodoError;
use crate::external_connections::{ExternalConnectivity, Transactable, TransactionHandle};
use anyhow::Context;

/// A single to-do item as it exists in storage. Only valid for as long as the
/// connection that loaded it, storage owns the authoritative copy.
#[derive(PartialEq, Eq, Debug)]
#[cfg_attr(test, derive(Clone))]
pub struct TodoItem {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub completed: bool,
}

#[cfg_attr(test, derive(Clone))]
pub struct NewTodo {
    pub title: String,
    pub description: String,
}

#[cfg_attr(test, derive(Clone))]
pub struct UpdateTodo {
    pub title: String,
    pub description: String,
}

pub mod driven_ports {
    use super::*;
    use crate::external_connections::ExternalConnectivity;

    pub trait TodoReader {
        async fn all(
            &self,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<Vec<TodoItem>, anyhow::Error>;
        async fn by_id(
            &self,
            todo_id: i64,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<Option<TodoItem>, anyhow::Error>;
    }

    pub trait TodoWriter {
        async fn create(
            &self,
            new_todo: &NewTodo,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<i64, anyhow::Error>;

        async fn update(
            &self,
            todo_id: i64,
            update: &UpdateTodo,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<(), anyhow::Error>;

        async fn delete(
            &self,
            todo_id: i64,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<(), anyhow::Error>;
    }
}

pub mod driving_ports {
    use super::*;
    use crate::external_connections::{ExternalConnectivity, Transactable};
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum TodoError {
        #[error("The requested to-do item did not exist.")]
        NotFound,
        #[error(transparent)]
        PortError(#[from] anyhow::Error),
    }


    pub trait TodoPort {
        async fn all_todos(
            &self,
            ext_cxn: &mut impl ExternalConnectivity,
            todo_read: &impl driven_ports::TodoReader,
        ) -> Result<Vec<TodoItem>, anyhow::Error>;
        async fn todo_by_id(
            &self,
            todo_id: i64,
            ext_cxn: &mut impl ExternalConnectivity,
            todo_read: &impl driven_ports::TodoReader,
        ) -> Result<TodoItem, TodoError>;
        async fn create_todo(
            &self,
            new_todo: &NewTodo,
            ext_cxn: &mut (impl ExternalConnectivity + Transactable),
            todo_read: &impl driven_ports::TodoReader,
            todo_write: &impl driven_ports::TodoWriter,
        ) -> Result<TodoItem, anyhow::Error>;
        async fn update_todo(
            &self,
            todo_id: i64,
            update: &UpdateTodo,
            ext_cxn: &mut (impl ExternalConnectivity + Transactable),
            todo_read: &impl driven_ports::TodoReader,
            todo_write: &impl driven_ports::TodoWriter,
        ) -> Result<TodoItem, TodoError>;
        async fn delete_todo(
            &self,
            todo_id: i64,
            ext_cxn: &mut (impl ExternalConnectivity + Transactable),
            todo_read: &impl driven_ports::TodoReader,
            todo_write: &impl driven_ports::TodoWriter,
        ) -> Result<(), TodoError>;
    }
}

pub struct TodoService {}

impl driving_ports::TodoPort for TodoService {
    async fn all_todos(
        &self,
        ext_cxn: &mut impl ExternalConnectivity,
        todo_read: &impl TodoReader,
    ) -> Result<Vec<TodoItem>, anyhow::Error> {
        let todos_result = todo_read
            .all(&mut *ext_cxn)
            .await
            .context("listing to-do items")?;

        Ok(todos_result)
    }

    async fn todo_by_id(
        &self,
        todo_id: i64,
        ext_cxn: &mut impl ExternalConnectivity,
        todo_read: &impl TodoReader,
    ) -> Result<TodoItem, TodoError> {
        let fetched_todo = todo_read
            .by_id(todo_id, &mut *ext_cxn)
            .await
            .context("fetching a to-do item")?;

        fetched_todo.ok_or(TodoError::NotFound)
    }

    async fn create_todo(
        &self,
        new_todo: &NewTodo,
        ext_cxn: &mut (impl ExternalConnectivity + Transactable),
        todo_read: &impl TodoReader,
        todo_write: &impl TodoWriter,
    ) -> Result<TodoItem, anyhow::Error> {
        let mut txn = ext_cxn
            .start_transaction()
            .await
            .context("opening a transaction to create a to-do item")?;

        let new_id = todo_write.create(new_todo, &mut txn).await?;
        // Re-read the row so generated fields come back from storage
        let created_todo = todo_read
            .by_id(new_id, &mut txn)
            .await?
            .context("re-reading a to-do item just after insert")?;
        txn.commit().await.context("committing to-do creation")?;

        Ok(created_todo)
    }

    async fn update_todo(
        &self,
        todo_id: i64,
        update: &UpdateTodo,
        ext_cxn: &mut (impl ExternalConnectivity + Transactable),
        todo_read: &impl TodoReader,
        todo_write: &impl TodoWriter,
    ) -> Result<TodoItem, TodoError> {
        let mut txn = ext_cxn
            .start_transaction()
            .await
            .context("opening a transaction to update a to-do item")?;

        todo_read
            .by_id(todo_id, &mut txn)
            .await
            .context("verifying a to-do item exists before update")?
            .ok_or(TodoError::NotFound)?;
        todo_write
            .update(todo_id, update, &mut txn)
            .await
            .context("updating a to-do item")?;
        let updated_todo = todo_read
            .by_id(todo_id, &mut txn)
            .await
            .context("re-reading a to-do item after update")?
            .context("a to-do item vanished mid-transaction")?;
        txn.commit().await.context("committing to-do update")?;

        Ok(updated_todo)
    }

    async fn delete_todo(
        &self,
        todo_id: i64,
        ext_cxn: &mut (impl ExternalConnectivity + Transactable),
        todo_read: &impl TodoReader,
        todo_write: &impl TodoWriter,
    ) -> Result<(), TodoError> {
        let mut txn = ext_cxn
            .start_transaction()
            .await
            .context("opening a transaction to delete a to-do item")?;

        todo_read
            .by_id(todo_id, &mut txn)
            .await
            .context("verifying a to-do item exists before delete")?
            .ok_or(TodoError::NotFound)?;
        todo_write
            .delete(todo_id, &mut txn)
            .await
            .context("deleting a to-do item")?;
        txn.commit().await.context("committing to-do deletion")?;

        Ok(())
    }
}
