use super::subject::Field;

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Browsing,
    Editing,
}

/// Columns of a subject row, left to right.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    #[default]
    Name,
    Grade,
    Credits,
    Remove,
}

impl Column {
    pub const ALL: [Column; 4] = [Column::Name, Column::Grade, Column::Credits, Column::Remove];

    pub fn next(self) -> Self {
        match self {
            Column::Name => Column::Grade,
            Column::Grade => Column::Credits,
            Column::Credits | Column::Remove => Column::Remove,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Column::Name | Column::Grade => Column::Name,
            Column::Credits => Column::Grade,
            Column::Remove => Column::Credits,
        }
    }

    pub fn field(self) -> Option<Field> {
        match self {
            Column::Name => Some(Field::Name),
            Column::Grade => Some(Field::Grade),
            Column::Credits => Some(Field::Credits),
            Column::Remove => None,
        }
    }

    /// Columns typed into rather than picked from.
    pub fn is_text(self) -> bool {
        matches!(self, Column::Name | Column::Credits)
    }
}
