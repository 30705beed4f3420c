//! Materia — the single persisted entity: one subject a student attends.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored subject record.
///
/// `id` is assigned by the store on creation and never reused. The other four
/// fields are always overwritten together on update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Materia {
  pub id:        Uuid,
  /// Subject name.
  pub materia:   String,
  pub professor: String,
  /// Term number.
  pub semestre:  i64,
  /// Absence count.
  pub faltas:    i64,
}

/// The four writable fields, as accepted by create and update and echoed
/// back in their responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MateriaInput {
  pub materia:   String,
  pub professor: String,
  pub semestre:  i64,
  pub faltas:    i64,
}

impl Materia {
  /// Build a record from an input and a store-assigned id.
  pub fn from_input(id: Uuid, input: MateriaInput) -> Self {
    Self {
      id,
      materia: input.materia,
      professor: input.professor,
      semestre: input.semestre,
      faltas: input.faltas,
    }
  }

  /// The writable half of this record.
  pub fn input(&self) -> MateriaInput {
    MateriaInput {
      materia:   self.materia.clone(),
      professor: self.professor.clone(),
      semestre:  self.semestre,
      faltas:    self.faltas,
    }
  }

  /// Case-insensitive comparison of the stored name against `name`.
  pub fn has_name(&self, name: &str) -> bool {
    self.materia.to_lowercase() == name.to_lowercase()
  }
}
