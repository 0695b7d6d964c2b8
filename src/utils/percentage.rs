use std::{fmt::Display, ops::Deref};

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Percentage(f64);

impl Display for Percentage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.rounded())
    }
}

impl Percentage {
    pub fn new_opt(value: f64) -> Option<Percentage> {
        if value < 0. || value.is_nan() {
            None
        } else {
            Some(Percentage(value))
        }
    }

    pub fn zero() -> Percentage {
        Percentage(0.)
    }

    /// Whole percent, halves rounded up.
    pub fn rounded(&self) -> u32 {
        self.0.round() as u32
    }
}

impl Deref for Percentage {
    type Target = f64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Share of `part` in `whole`. A zero `whole` gives 0%.
pub fn share_percentage(part: u32, whole: u32) -> Percentage {
    if whole == 0 {
        return Percentage::zero();
    }
    Percentage::new_opt(part as f64 / whole as f64 * 100.).unwrap_or_else(Percentage::zero)
}

#[cfg(test)]
mod tests {
    use super::{share_percentage, Percentage};

    #[test]
    fn test_share_percentage() {
        assert_eq!(share_percentage(1, 4).rounded(), 25);
        assert_eq!(share_percentage(2, 3).rounded(), 67);
        assert_eq!(share_percentage(1, 8).rounded(), 13);
        assert_eq!(share_percentage(3, 0), Percentage::zero());
    }

    #[test]
    fn test_negative_percentage() {
        assert!(Percentage::new_opt(-1.).is_none());
        assert_eq!(Percentage::new_opt(40.).unwrap().to_string(), "40%");
    }
}
