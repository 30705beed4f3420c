//! Conversions between domain types and the plain values stored in SQLite
//! columns. UUIDs are stored as hyphenated lowercase strings.

use rollcall_core::materia::Materia;
use uuid::Uuid;

use crate::Result;

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

/// Column list shared by every `SELECT` that builds a [`RawMateria`].
pub const MATERIA_COLUMNS: &str = "id, materia, professor, semestre, faltas";

/// A `materias` row as read from SQLite, before id decoding.
pub struct RawMateria {
  pub id:        String,
  pub materia:   String,
  pub professor: String,
  pub semestre:  i64,
  pub faltas:    i64,
}

impl RawMateria {
  /// Read a row selected with [`MATERIA_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(RawMateria {
      id:        row.get(0)?,
      materia:   row.get(1)?,
      professor: row.get(2)?,
      semestre:  row.get(3)?,
      faltas:    row.get(4)?,
    })
  }

  pub fn into_materia(self) -> Result<Materia> {
    Ok(Materia {
      id:        decode_uuid(&self.id)?,
      materia:   self.materia,
      professor: self.professor,
      semestre:  self.semestre,
      faltas:    self.faltas,
    })
  }
}
