use rand::RngCore;

pub mod commerce;
pub mod feedback;
pub mod orders;
pub mod people;

pub use commerce::{category_faker, product_faker};
pub use feedback::{report_faker, review_faker};
pub use orders::order_faker;
pub use people::client_faker;

type Rule<T> = Box<dyn Fn(&mut dyn RngCore, &mut T) + Send + Sync>;

struct FieldRule<T> {
    field: &'static str,
    apply: Rule<T>,
}

/// Builds records of `T` by applying one rule per field.
///
/// Rules run in registration order on a default-initialised record, so a rule
/// can read any field set by an earlier rule (e.g. a user name copied from the
/// email).
pub struct RecordFaker<T> {
    rules: Vec<FieldRule<T>>,
}

impl<T: Default> RecordFaker<T> {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Register the rule for `field`. Each field may have one rule.
    pub fn rule<F>(mut self, field: &'static str, apply: F) -> Self
    where
        F: Fn(&mut dyn RngCore, &mut T) + Send + Sync + 'static,
    {
        assert!(
            !self.rules.iter().any(|rule| rule.field == field),
            "duplicate rule for field '{field}'"
        );
        self.rules.push(FieldRule {
            field,
            apply: Box::new(apply),
        });
        self
    }

    /// Field names in evaluation order.
    pub fn fields(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.field).collect()
    }

    pub fn generate(&self, rng: &mut dyn RngCore) -> T {
        let mut record = T::default();
        for rule in &self.rules {
            (rule.apply)(rng, &mut record);
        }
        record
    }

    pub fn generate_many(&self, count: usize, rng: &mut dyn RngCore) -> Vec<T> {
        (0..count).map(|_| self.generate(rng)).collect()
    }
}

impl<T: Default> Default for RecordFaker<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for RecordFaker<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordFaker")
            .field(
                "fields",
                &self.rules.iter().map(|rule| rule.field).collect::<Vec<_>>(),
            )
            .finish()
    }
}

fn pick<'a>(values: &[&'a str], rng: &mut dyn RngCore) -> &'a str {
    use rand::Rng;
    values[rng.random_range(0..values.len())]
}
