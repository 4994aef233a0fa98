use std::convert::Infallible;
use std::str::FromStr;

use log::warn;

use crate::error::{KDTreeError, Result};
use crate::r#type::IndexableNum;
use crate::selector::{AxisSelector, CycleSelector};

/// The axis selection strategies known by name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectorKind {
    /// [`CycleSelector`], the default.
    #[default]
    Cycle,
    /// Split on the axis of largest variance. Reserved; not implemented.
    Variance,
}

impl SelectorKind {
    /// Resolve a strategy by name.
    ///
    /// Any name other than `"variance"` resolves to [`SelectorKind::Cycle`]. Unrecognized
    /// non-empty names are logged as a warning.
    pub fn from_name(name: &str) -> Self {
        match name {
            "variance" => Self::Variance,
            "cycle" | "" => Self::Cycle,
            other => {
                warn!("unknown axis selector {:?}, cycle selected", other);
                Self::Cycle
            }
        }
    }

    /// Instantiate the strategy.
    pub fn create<N: IndexableNum>(self) -> Result<Box<dyn AxisSelector<N>>> {
        match self {
            Self::Cycle => Ok(Box::new(CycleSelector::new())),
            Self::Variance => Err(KDTreeError::UnsupportedSelector("variance".to_string())),
        }
    }
}

impl FromStr for SelectorKind {
    type Err = Infallible;

    /// Same as [`SelectorKind::from_name`]; parsing never fails.
    fn from_str(name: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::from_name(name))
    }
}

/// Create an axis selector by name.
///
/// ```
/// use nn_kdtree::selector::create_selector;
///
/// assert!(create_selector::<f64>("cycle").is_ok());
/// assert!(create_selector::<f64>("no-such-strategy").is_ok());
/// assert!(create_selector::<f64>("variance").is_err());
/// ```
pub fn create_selector<N: IndexableNum>(name: &str) -> Result<Box<dyn AxisSelector<N>>> {
    SelectorKind::from_name(name).create()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::point::Point;

    #[test]
    fn resolves_names() {
        assert_eq!(SelectorKind::from_name("cycle"), SelectorKind::Cycle);
        assert_eq!(SelectorKind::from_name(""), SelectorKind::Cycle);
        assert_eq!(SelectorKind::from_name("median"), SelectorKind::Cycle);
        assert_eq!(SelectorKind::from_name("variance"), SelectorKind::Variance);
    }

    #[test]
    fn parses_names() {
        assert_eq!("cycle".parse::<SelectorKind>(), Ok(SelectorKind::Cycle));
        assert_eq!("variance".parse::<SelectorKind>(), Ok(SelectorKind::Variance));
        assert_eq!("median".parse::<SelectorKind>(), Ok(SelectorKind::Cycle));
        assert_eq!(SelectorKind::from_str(""), Ok(SelectorKind::default()));
    }

    #[test]
    fn variance_is_unsupported() {
        let err = create_selector::<f32>("variance").unwrap_err();
        assert!(matches!(err, KDTreeError::UnsupportedSelector(name) if name == "variance"));
    }

    #[test]
    fn unrecognized_name_is_usable() {
        let mut selector = create_selector::<f64>("anything-unrecognized").unwrap();
        let points = vec![Point::new(vec![0., 0., 0.], 0), Point::new(vec![1., 1., 1.], 1)];
        selector.set(&points, 4);
        assert_eq!(selector.axis().unwrap(), 1);
        assert_eq!(selector.position(), 1);
    }

    #[test]
    fn cycle_axes_in_two_dimensions() {
        let mut selector = create_selector::<f64>("cycle").unwrap();
        let points = vec![
            Point::new(vec![0., 0.], 0),
            Point::new(vec![1., 1.], 1),
            Point::new(vec![2., 2.], 2),
        ];
        let axes: Vec<usize> = (0..4)
            .map(|depth| {
                selector.set(&points, depth);
                selector.axis().unwrap()
            })
            .collect();
        assert_eq!(axes, vec![0, 1, 0, 1]);
    }
}
