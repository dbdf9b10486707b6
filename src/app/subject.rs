use super::grade::grade_points;

/// The editable parts of a subject row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Grade,
    Credits,
}

/// One subject as typed into the form. Every field keeps the raw text;
/// grade and credits are only interpreted when the CGPA is calculated.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Subject {
    pub name: String,
    pub grade: String,
    pub credits: String,
}

impl Subject {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Grade => &self.grade,
            Field::Credits => &self.credits,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.name = value,
            Field::Grade => self.grade = value,
            Field::Credits => self.credits = value,
        }
    }

    pub fn grade_points(&self) -> f64 {
        f64::from(grade_points(&self.grade))
    }

    pub fn credits(&self) -> f64 {
        parse_credits(&self.credits)
    }
}

/// Anything that is not a finite, positive decimal counts as zero credits.
pub fn parse_credits(text: &str) -> f64 {
    match text.trim().parse::<f64>() {
        Ok(credits) if credits.is_finite() && credits > 0.0 => credits,
        _ => 0.0,
    }
}
