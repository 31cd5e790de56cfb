use serde::Serialize;

/// Qualitative reading of a correlation coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Relationship {
    StrongPositive,
    WeakPositive,
    Negative,
    NoClearRelationship,
}

impl Relationship {
    pub fn label(self) -> &'static str {
        match self {
            Relationship::StrongPositive => "strong positive",
            Relationship::WeakPositive => "weak positive",
            Relationship::Negative => "negative",
            Relationship::NoClearRelationship => "no clear relationship",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Relationship::StrongPositive => {
                "Sales and passenger traffic show a strong positive correlation."
            }
            Relationship::WeakPositive => {
                "Sales and passenger traffic show a weak positive correlation."
            }
            Relationship::Negative => "Sales and passenger traffic show a negative correlation.",
            Relationship::NoClearRelationship => {
                "No clear correlation between sales and passenger traffic."
            }
        }
    }
}

/// Maps a coefficient onto a [`Relationship`].
///
/// | Range        | Relationship          |
/// |--------------|-----------------------|
/// | > 0.7        | strong positive       |
/// | > 0.4        | weak positive         |
/// | < -0.4       | negative              |
/// | otherwise    | no clear relationship |
pub fn classify(r: f64) -> Relationship {
    match r {
        r if r > 0.7 => Relationship::StrongPositive,
        r if r > 0.4 => Relationship::WeakPositive,
        r if r < -0.4 => Relationship::Negative,
        _ => Relationship::NoClearRelationship,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(classify(1.0), Relationship::StrongPositive);
        assert_eq!(classify(0.7000001), Relationship::StrongPositive);
        assert_eq!(classify(0.70), Relationship::WeakPositive);
        assert_eq!(classify(0.41), Relationship::WeakPositive);
        assert_eq!(classify(0.4), Relationship::NoClearRelationship);
        assert_eq!(classify(0.0), Relationship::NoClearRelationship);
        assert_eq!(classify(-0.4), Relationship::NoClearRelationship);
        assert_eq!(classify(-0.41), Relationship::Negative);
        assert_eq!(classify(-1.0), Relationship::Negative);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Relationship::StrongPositive.label(), "strong positive");
        assert_eq!(
            Relationship::NoClearRelationship.label(),
            "no clear relationship"
        );
    }
}
