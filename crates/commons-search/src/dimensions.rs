//! Filter dimension descriptors.
//!
//! Query-string encoding and chip display both depend on dimension order,
//! so the canonical order is an explicit declared list: [`DIMENSIONS`].
//! Chip generation iterates it in reverse; the codec iterates it forward.

/// One named axis of filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DimensionId {
    PostTypes,
    Date,
    DateFrom,
    DateTo,
    Categories,
    Sources,
    Language,
}

impl DimensionId {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PostTypes => "postTypes",
            Self::Date => "date",
            Self::DateFrom => "dateFrom",
            Self::DateTo => "dateTo",
            Self::Categories => "categories",
            Self::Sources => "sources",
            Self::Language => "language",
        }
    }

    pub fn descriptor(self) -> &'static DimensionDescriptor {
        // DIMENSIONS is declared in enum order.
        match self {
            Self::PostTypes => &DIMENSIONS[0],
            Self::Date => &DIMENSIONS[1],
            Self::DateFrom => &DIMENSIONS[2],
            Self::DateTo => &DIMENSIONS[3],
            Self::Categories => &DIMENSIONS[4],
            Self::Sources => &DIMENSIONS[5],
            Self::Language => &DIMENSIONS[6],
        }
    }
}

impl std::fmt::Display for DimensionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a dimension holds one value or an ordered set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Single,
    Multi,
}

/// Static description of one filter dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DimensionDescriptor {
    pub id: DimensionId,
    /// Key used in the URL query string.
    pub query_key: &'static str,
    pub arity: Arity,
    /// Name of the backing taxonomy list. `date` and `language` pluralize;
    /// internal dimensions have none.
    pub reference_list: Option<&'static str>,
    /// Internal dimensions (`dateFrom`/`dateTo`) never produce chips and
    /// never reach the query string.
    pub user_facing: bool,
}

/// Canonical dimension declaration order.
pub const DIMENSIONS: [DimensionDescriptor; 7] = [
    DimensionDescriptor {
        id: DimensionId::PostTypes,
        query_key: "postTypes",
        arity: Arity::Multi,
        reference_list: Some("postTypes"),
        user_facing: true,
    },
    DimensionDescriptor {
        id: DimensionId::Date,
        query_key: "date",
        arity: Arity::Single,
        reference_list: Some("dates"),
        user_facing: true,
    },
    DimensionDescriptor {
        id: DimensionId::DateFrom,
        query_key: "dateFrom",
        arity: Arity::Single,
        reference_list: None,
        user_facing: false,
    },
    DimensionDescriptor {
        id: DimensionId::DateTo,
        query_key: "dateTo",
        arity: Arity::Single,
        reference_list: None,
        user_facing: false,
    },
    DimensionDescriptor {
        id: DimensionId::Categories,
        query_key: "categories",
        arity: Arity::Multi,
        reference_list: Some("categories"),
        user_facing: true,
    },
    DimensionDescriptor {
        id: DimensionId::Sources,
        query_key: "sources",
        arity: Arity::Multi,
        reference_list: Some("sources"),
        user_facing: true,
    },
    DimensionDescriptor {
        id: DimensionId::Language,
        query_key: "language",
        arity: Arity::Single,
        reference_list: Some("languages"),
        user_facing: true,
    },
];

#[cfg(test)]
mod tests {
    use super::{Arity, DimensionId, DIMENSIONS};

    #[test]
    fn every_dimension_has_a_descriptor() {
        let all = [
            DimensionId::PostTypes,
            DimensionId::Date,
            DimensionId::DateFrom,
            DimensionId::DateTo,
            DimensionId::Categories,
            DimensionId::Sources,
            DimensionId::Language,
        ];
        for id in all {
            assert_eq!(id.descriptor().id, id);
        }
    }

    #[test]
    fn date_and_language_reference_lists_are_pluralized() {
        assert_eq!(
            DimensionId::Date.descriptor().reference_list,
            Some("dates")
        );
        assert_eq!(
            DimensionId::Language.descriptor().reference_list,
            Some("languages")
        );
        assert_eq!(
            DimensionId::Categories.descriptor().reference_list,
            Some("categories")
        );
    }

    #[test]
    fn internal_date_bounds_are_not_user_facing() {
        assert!(!DimensionId::DateFrom.descriptor().user_facing);
        assert!(!DimensionId::DateTo.descriptor().user_facing);
        assert!(DIMENSIONS.iter().filter(|d| !d.user_facing).count() == 2);
    }

    #[test]
    fn arity_matches_dimension_kind() {
        assert_eq!(DimensionId::PostTypes.descriptor().arity, Arity::Multi);
        assert_eq!(DimensionId::Language.descriptor().arity, Arity::Single);
        assert_eq!(DimensionId::Date.descriptor().arity, Arity::Single);
    }
}
