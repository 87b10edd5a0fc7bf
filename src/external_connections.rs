use sqlx::SqliteConnection;

/// Owns clients for systems outside the process boundary, currently just the
/// database. Business logic takes an implementation of this trait so driven
/// adapters can be swapped out without touching the domain.
pub trait ExternalConnectivity {
    type DbHandle<'cxn_borrow>: ConnectionHandle
    where
        Self: 'cxn_borrow;

    /// Borrows a handle which can produce a live database connection
    async fn database_cxn(&mut self) -> Result<Self::DbHandle<'_>, anyhow::Error>;
}

/// A handle lending out an active database connection
pub trait ConnectionHandle {
    fn borrow_connection(&mut self) -> &mut SqliteConnection;
}

/// Something which can open a database transaction. The handle it produces is
/// itself an [ExternalConnectivity], so driven ports work identically inside
/// and outside a transaction.
pub trait Transactable {
    type Handle: TransactionHandle + ExternalConnectivity;

    async fn start_transaction(&self) -> Result<Self::Handle, anyhow::Error>;
}

/// An open database transaction. Dropping the handle without calling
/// [commit](TransactionHandle::commit) rolls the transaction back.
pub trait TransactionHandle {
    async fn commit(self) -> Result<(), anyhow::Error>;
}
