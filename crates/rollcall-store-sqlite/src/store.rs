//! [`SqliteStore`] — the SQLite implementation of [`MateriaStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use rollcall_core::{
  materia::{Materia, MateriaInput},
  store::MateriaStore,
};

use crate::{
  Error, Result,
  encode::{MATERIA_COLUMNS, RawMateria, encode_uuid},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A record store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── MateriaStore impl ───────────────────────────────────────────────────────

impl MateriaStore for SqliteStore {
  type Error = Error;

  async fn create(&self, input: MateriaInput) -> Result<Materia> {
    let materia = Materia::from_input(Uuid::new_v4(), input);

    let id_str = encode_uuid(materia.id);
    let MateriaInput { materia: name, professor, semestre, faltas } = materia.input();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO materias (id, materia, professor, semestre, faltas)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![id_str, name, professor, semestre, faltas],
        )?;
        Ok(())
      })
      .await?;

    tracing::debug!(id = %materia.id, "inserted materia");
    Ok(materia)
  }

  async fn list(&self) -> Result<Vec<Materia>> {
    let raws: Vec<RawMateria> = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare(&format!("SELECT {MATERIA_COLUMNS} FROM materias ORDER BY rowid"))?;
        let rows = stmt
          .query_map([], RawMateria::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawMateria::into_materia).collect()
  }

  async fn get(&self, id: Uuid) -> Result<Option<Materia>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawMateria> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {MATERIA_COLUMNS} FROM materias WHERE id = ?1"),
              rusqlite::params![id_str],
              RawMateria::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawMateria::into_materia).transpose()
  }

  async fn update(&self, id: Uuid, input: MateriaInput) -> Result<Materia> {
    let materia = Materia::from_input(id, input);

    let id_str = encode_uuid(id);
    let MateriaInput { materia: name, professor, semestre, faltas } = materia.input();

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE materias
           SET materia = ?2, professor = ?3, semestre = ?4, faltas = ?5
           WHERE id = ?1",
          rusqlite::params![id_str, name, professor, semestre, faltas],
        )?)
      })
      .await?;

    if changed == 0 {
      return Err(Error::NotFound(id));
    }

    tracing::debug!(%id, "updated materia");
    Ok(materia)
  }

  async fn delete(&self, id: Uuid) -> Result<()> {
    let id_str = encode_uuid(id);

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM materias WHERE id = ?1", rusqlite::params![id_str])?)
      })
      .await?;

    if changed == 0 {
      return Err(Error::NotFound(id));
    }

    tracing::debug!(%id, "deleted materia");
    Ok(())
  }
}
