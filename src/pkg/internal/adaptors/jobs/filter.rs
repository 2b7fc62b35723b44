use super::spec::JobEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobField {
    Title,
    Company,
    Location,
    Experience,
    Source,
    SearchedTitle,
    SearchedLocation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Case-insensitive literal substring.
    Contains,
    Exact,
}

impl JobField {
    pub fn column(self) -> &'static str {
        match self {
            JobField::Title => "title",
            JobField::Company => "company",
            JobField::Location => "location",
            JobField::Experience => "experience",
            JobField::Source => "source",
            JobField::SearchedTitle => "searched_title",
            JobField::SearchedLocation => "searched_location",
        }
    }

    pub fn match_kind(self) -> MatchKind {
        match self {
            JobField::Source => MatchKind::Exact,
            _ => MatchKind::Contains,
        }
    }

    fn value_of(self, job: &JobEntry) -> Option<&str> {
        match self {
            JobField::Title => Some(&job.title),
            JobField::Company => Some(&job.company),
            JobField::Location => Some(&job.location),
            JobField::Experience => Some(&job.experience),
            JobField::Source => Some(&job.source),
            JobField::SearchedTitle => job.searched_title.as_deref(),
            JobField::SearchedLocation => job.searched_location.as_deref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub field: JobField,
    pub kind: MatchKind,
    pub value: String,
}

impl Clause {
    fn matches(&self, job: &JobEntry) -> bool {
        let Some(actual) = self.field.value_of(job) else {
            return false;
        };
        match self.kind {
            MatchKind::Exact => actual == self.value,
            MatchKind::Contains => actual.to_lowercase().contains(&self.value.to_lowercase()),
        }
    }
}

/// Conjunction of field predicates. An empty filter matches every job.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobFilter {
    clauses: Vec<Clause>,
}

impl JobFilter {
    /// Adds a predicate on `field`; empty values are ignored.
    pub fn with(mut self, field: JobField, value: impl Into<String>) -> Self {
        let value = value.into();
        if !value.is_empty() {
            self.clauses.push(Clause {
                field,
                kind: field.match_kind(),
                value,
            });
        }
        self
    }

    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (JobField, Option<String>)>,
    {
        pairs
            .into_iter()
            .filter_map(|(field, value)| value.map(|v| (field, v)))
            .fold(JobFilter::default(), |filter, (field, value)| filter.with(field, value))
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn matches(&self, job: &JobEntry) -> bool {
        self.clauses.iter().all(|c| c.matches(job))
    }
}

/// Escapes LIKE wildcards so the value matches literally under `ESCAPE '\'`.
pub fn escape_like(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
