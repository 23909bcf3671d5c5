//! Read-only query surface over indexed entities.
//!
//! Mirrors the subset of graph-node's collection queries the frontend uses:
//! `where` filters with the usual operator suffixes, `orderBy` /
//! `orderDirection`, and `first` / `skip` pagination.

use std::cmp::Ordering;

use daocean_types::{Entity, EventKind, FieldKind, U256, Value};

use crate::store::EntityStore;

pub const DEFAULT_FIRST: usize = 100;
pub const MAX_FIRST: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("unknown collection: {0}")]
    UnknownCollection(String),
    #[error("{kind} has no field `{field}`")]
    UnknownField { kind: EventKind, field: String },
    #[error("operator `{op}` is not supported on `{field}`")]
    UnsupportedOperator { field: String, op: &'static str },
    #[error("invalid value for `{field}`: {value:?}")]
    InvalidValue { field: String, value: String },
    #[error("invalid `{name}`: {value:?}")]
    InvalidArgument { name: &'static str, value: String },
    #[error("`first` must be at most 1000, got {0}")]
    FirstTooLarge(usize),
    #[error("{0} is not scoped to a DAO")]
    NotDaoScoped(EventKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Not,
    Gt,
    Gte,
    Lt,
    Lte,
    In,
    NotIn,
    Contains,
}

impl FilterOp {
    /// Longest suffixes first so `_not_in` wins over `_in` and `_not`.
    const SUFFIXES: [(&'static str, FilterOp); 8] = [
        ("_not_in", FilterOp::NotIn),
        ("_contains", FilterOp::Contains),
        ("_gte", FilterOp::Gte),
        ("_lte", FilterOp::Lte),
        ("_not", FilterOp::Not),
        ("_gt", FilterOp::Gt),
        ("_lt", FilterOp::Lt),
        ("_in", FilterOp::In),
    ];

    /// Split a where-key like `amount_gte` into (`amount`, Gte).
    pub fn split_key(key: &str) -> (&str, FilterOp) {
        for (suffix, op) in Self::SUFFIXES {
            if let Some(field) = key.strip_suffix(suffix) {
                if !field.is_empty() {
                    return (field, op);
                }
            }
        }
        (key, FilterOp::Eq)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FilterOp::Eq => "eq",
            FilterOp::Not => "not",
            FilterOp::Gt => "gt",
            FilterOp::Gte => "gte",
            FilterOp::Lt => "lt",
            FilterOp::Lte => "lte",
            FilterOp::In => "in",
            FilterOp::NotIn => "not_in",
            FilterOp::Contains => "contains",
        }
    }
}

/// A parsed where-clause. Built only through [`EntityQuery::filter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    field: String,
    op: FilterOp,
    values: Vec<Value>,
}

impl Filter {
    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn op(&self) -> FilterOp {
        self.op
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    fn matches(&self, entity: &Entity) -> bool {
        let Some(actual) = entity.get(&self.field) else {
            return false;
        };
        // Empty `_in` matches nothing, empty `_not_in` matches everything.
        match self.op {
            FilterOp::In => return self.values.contains(&actual),
            FilterOp::NotIn => return !self.values.contains(&actual),
            _ => {}
        }
        let Some(expected) = self.values.first() else {
            return false;
        };
        let ord = actual.compare(expected);
        match self.op {
            FilterOp::Eq => actual == *expected,
            FilterOp::Not => actual != *expected,
            FilterOp::Gt => ord == Some(Ordering::Greater),
            FilterOp::Gte => matches!(ord, Some(Ordering::Greater | Ordering::Equal)),
            FilterOp::Lt => ord == Some(Ordering::Less),
            FilterOp::Lte => matches!(ord, Some(Ordering::Less | Ordering::Equal)),
            FilterOp::Contains => match (actual.as_str(), expected.as_str()) {
                (Some(haystack), Some(needle)) => haystack.contains(needle),
                _ => false,
            },
            FilterOp::In | FilterOp::NotIn => false,
        }
    }
}

/// A collection query. Build with the chained setters or [`EntityQuery::from_params`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityQuery {
    pub kind: EventKind,
    pub filters: Vec<Filter>,
    pub order_by: String,
    pub direction: OrderDirection,
    pub first: usize,
    pub skip: usize,
}

impl EntityQuery {
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            filters: Vec::new(),
            order_by: "id".to_string(),
            direction: OrderDirection::Asc,
            first: DEFAULT_FIRST,
            skip: 0,
        }
    }

    fn attribute(&self, field: &str) -> Result<FieldKind, QueryError> {
        Entity::attribute_kind(self.kind, field).ok_or_else(|| QueryError::UnknownField {
            kind: self.kind,
            field: field.to_string(),
        })
    }

    /// Add a filter; `literal` is comma-separated for `In` / `NotIn`.
    pub fn filter(mut self, field: &str, op: FilterOp, literal: &str) -> Result<Self, QueryError> {
        let kind = self.attribute(field)?;
        if op == FilterOp::Contains && kind != FieldKind::String {
            return Err(QueryError::UnsupportedOperator {
                field: field.to_string(),
                op: op.as_str(),
            });
        }

        let parse = |text: &str| {
            Value::parse(kind, text).map_err(|_| QueryError::InvalidValue {
                field: field.to_string(),
                value: text.to_string(),
            })
        };
        let values = match op {
            FilterOp::In | FilterOp::NotIn => literal
                .split(',')
                .filter(|s| !s.is_empty())
                .map(parse)
                .collect::<Result<Vec<_>, _>>()?,
            _ => vec![parse(literal)?],
        };
        if values.is_empty() {
            return Err(QueryError::InvalidValue {
                field: field.to_string(),
                value: literal.to_string(),
            });
        }

        self.filters.push(Filter {
            field: field.to_string(),
            op,
            values,
        });
        Ok(self)
    }

    pub fn where_eq(self, field: &str, literal: &str) -> Result<Self, QueryError> {
        self.filter(field, FilterOp::Eq, literal)
    }

    pub fn order_by(mut self, field: &str, direction: OrderDirection) -> Result<Self, QueryError> {
        self.attribute(field)?;
        self.order_by = field.to_string();
        self.direction = direction;
        Ok(self)
    }

    pub fn first(mut self, first: usize) -> Result<Self, QueryError> {
        if first > MAX_FIRST {
            return Err(QueryError::FirstTooLarge(first));
        }
        self.first = first;
        Ok(self)
    }

    pub fn skip(mut self, skip: usize) -> Self {
        self.skip = skip;
        self
    }

    /// Build a query from URL-style pairs.
    ///
    /// `first`, `skip`, `orderBy` and `orderDirection` are reserved; every
    /// other key is a where-filter (`owner=0x..`, `amount_gt=100`).
    pub fn from_params<'a, I>(collection: &str, params: I) -> Result<Self, QueryError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let kind = EventKind::from_collection(collection)
            .ok_or_else(|| QueryError::UnknownCollection(collection.to_string()))?;
        let mut query = Self::new(kind);
        let mut order_by: Option<&str> = None;
        let mut direction = OrderDirection::Asc;

        for (key, value) in params {
            match key {
                "first" => {
                    let n = parse_usize("first", value)?;
                    query = query.first(n)?;
                }
                "skip" => query = query.skip(parse_usize("skip", value)?),
                "orderBy" => order_by = Some(value),
                "orderDirection" => {
                    direction = match value {
                        "asc" => OrderDirection::Asc,
                        "desc" => OrderDirection::Desc,
                        other => {
                            return Err(QueryError::InvalidArgument {
                                name: "orderDirection",
                                value: other.to_string(),
                            })
                        }
                    }
                }
                where_key => {
                    let (field, op) = FilterOp::split_key(where_key);
                    query = query.filter(field, op, value)?;
                }
            }
        }

        query.order_by(order_by.unwrap_or("id"), direction)
    }
}

fn parse_usize(name: &'static str, value: &str) -> Result<usize, QueryError> {
    value.parse().map_err(|_| QueryError::InvalidArgument {
        name,
        value: value.to_string(),
    })
}

/// Run a query. Never mutates the store.
pub fn execute<'s, S: EntityStore + ?Sized>(
    store: &'s S,
    query: &EntityQuery,
) -> Vec<&'s Entity> {
    let mut rows: Vec<(&Entity, Option<Value>)> = store
        .scan(query.kind)
        .filter(|e| query.filters.iter().all(|f| f.matches(e)))
        .map(|e| (e, e.get(&query.order_by)))
        .collect();

    rows.sort_by(|(a, ka), (b, kb)| {
        let primary = match (ka, kb) {
            (Some(x), Some(y)) => x.compare(y).unwrap_or(Ordering::Equal),
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        let ord = primary.then_with(|| a.id().cmp(b.id()));
        match query.direction {
            OrderDirection::Asc => ord,
            OrderDirection::Desc => ord.reverse(),
        }
    });

    rows.into_iter()
        .skip(query.skip)
        .take(query.first)
        .map(|(e, _)| e)
        .collect()
}

// =============================================================================
// Frontend views
// =============================================================================

/// DAOs created by `owner`, by name descending (sidebar DAO picker).
pub fn my_daos(owner: &str) -> Result<EntityQuery, QueryError> {
    EntityQuery::new(EventKind::DaoCreated)
        .where_eq("owner", owner)?
        .order_by("name", OrderDirection::Desc)
}

/// The ten most recent DAOs by id (join page).
pub fn recent_daos() -> Result<EntityQuery, QueryError> {
    EntityQuery::new(EventKind::DaoCreated)
        .order_by("id", OrderDirection::Desc)?
        .first(10)
}

/// Any DAO-keyed collection restricted to one DAO, newest id first.
pub fn dao_scoped(kind: EventKind, dao_id: U256) -> Result<EntityQuery, QueryError> {
    if !kind.is_dao_scoped() {
        return Err(QueryError::NotDaoScoped(kind));
    }
    EntityQuery::new(kind)
        .where_eq("daoId", &dao_id.to_string())?
        .order_by("id", OrderDirection::Desc)
}

/// Deposits of one DAO (funds page).
pub fn dao_deposits(dao_id: U256) -> Result<EntityQuery, QueryError> {
    dao_scoped(EventKind::FundsDeposited, dao_id)?.first(20)
}
