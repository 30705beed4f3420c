//! The subject form view-model and its validation rules.
//!
//! The form holds raw text exactly as typed. Nothing is parsed until
//! [`MateriaForm::validate`] turns it into a [`MateriaInput`] ready to submit.

use std::ops::RangeInclusive;

use strum::{Display, EnumIter, IntoEnumIterator as _};

use crate::{
  ValidationError,
  materia::{Materia, MateriaInput},
};

/// Terms offered by the term picker. Typed values outside this range are
/// still accepted as long as they are positive.
pub const TERM_CHOICES: RangeInclusive<i64> = 1..=12;

// ─── Fields ──────────────────────────────────────────────────────────────────

/// One input of the form, in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum FormField {
  #[strum(to_string = "Subject")]
  Materia,
  #[strum(to_string = "Professor")]
  Professor,
  #[strum(to_string = "Term")]
  Semestre,
  #[strum(to_string = "Absences")]
  Faltas,
}

impl FormField {
  /// The field after this one, wrapping around.
  pub fn next(self) -> Self {
    Self::iter()
      .cycle()
      .skip_while(|f| *f != self)
      .nth(1)
      .unwrap_or(self)
  }

  /// The field before this one, wrapping around.
  pub fn prev(self) -> Self {
    Self::iter()
      .rev()
      .cycle()
      .skip_while(|f| *f != self)
      .nth(1)
      .unwrap_or(self)
  }

  pub fn placeholder(self) -> &'static str {
    match self {
      FormField::Materia => "Subject name",
      FormField::Professor => "Professor name",
      FormField::Semestre => "Which term?",
      FormField::Faltas => "How many absences?",
    }
  }
}

// ─── View-model ──────────────────────────────────────────────────────────────

/// Raw contents of the four form inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MateriaForm {
  materia:   String,
  professor: String,
  semestre:  String,
  faltas:    String,
}

impl MateriaForm {
  pub fn get(&self, field: FormField) -> &str {
    match field {
      FormField::Materia => &self.materia,
      FormField::Professor => &self.professor,
      FormField::Semestre => &self.semestre,
      FormField::Faltas => &self.faltas,
    }
  }

  fn slot(&mut self, field: FormField) -> &mut String {
    match field {
      FormField::Materia => &mut self.materia,
      FormField::Professor => &mut self.professor,
      FormField::Semestre => &mut self.semestre,
      FormField::Faltas => &mut self.faltas,
    }
  }

  /// Replace the contents of `field`.
  pub fn set(&mut self, field: FormField, value: impl Into<String>) {
    *self.slot(field) = value.into();
  }

  pub fn push_char(&mut self, field: FormField, c: char) { self.slot(field).push(c); }

  pub fn pop_char(&mut self, field: FormField) { self.slot(field).pop(); }

  /// Empty every input.
  pub fn clear(&mut self) { *self = Self::default(); }

  /// Pre-fill every input with the current values of `record`.
  pub fn fill_from(&mut self, record: &Materia) {
    self.materia = record.materia.clone();
    self.professor = record.professor.clone();
    self.semestre = record.semestre.to_string();
    self.faltas = record.faltas.to_string();
  }

  /// Step the term through [`TERM_CHOICES`], wrapping at either end.
  ///
  /// A blank or out-of-range term jumps to the first choice when stepping
  /// forward and to the last when stepping back.
  pub fn cycle_semestre(&mut self, step: i64) {
    let (first, last) = (*TERM_CHOICES.start(), *TERM_CHOICES.end());
    let next = match parse_int(&self.semestre).filter(|t| TERM_CHOICES.contains(t)) {
      Some(current) => {
        let span = last - first + 1;
        first + (current - first + step).rem_euclid(span)
      }
      None if step < 0 => last,
      None => first,
    };
    self.semestre = next.to_string();
  }

  /// Check the form and produce the body to submit.
  ///
  /// Rules, in order:
  /// 1. subject or professor blank after trimming, or term/absences not an
  ///    integer → [`ValidationError::Incomplete`];
  /// 2. term <= 0 or absences < 0 → [`ValidationError::OutOfRange`];
  /// 3. unless `editing`, the trimmed subject name matches an `existing`
  ///    record's name ignoring case → [`ValidationError::Duplicate`].
  ///
  /// Text fields are submitted as typed, not trimmed.
  pub fn validate(
    &self,
    existing: &[Materia],
    editing: bool,
  ) -> Result<MateriaInput, ValidationError> {
    let name = self.materia.trim();
    let professor = self.professor.trim();

    let (Some(semestre), Some(faltas)) = (parse_int(&self.semestre), parse_int(&self.faltas))
    else {
      return Err(ValidationError::Incomplete);
    };
    if name.is_empty() || professor.is_empty() {
      return Err(ValidationError::Incomplete);
    }

    if semestre <= 0 || faltas < 0 {
      return Err(ValidationError::OutOfRange);
    }

    if !editing && existing.iter().any(|m| m.has_name(name)) {
      return Err(ValidationError::Duplicate);
    }

    Ok(MateriaInput {
      materia: self.materia.clone(),
      professor: self.professor.clone(),
      semestre,
      faltas,
    })
  }
}

fn parse_int(raw: &str) -> Option<i64> { raw.trim().parse().ok() }
