use crate::{
    ast::{Column, JoinClause, Select, SqlCondition, SqlExpr},
    schema::Schema,
};
use fql_compiler::{AggregateTarget, Backend, BackendError, CompiledQuery};
use fql_syntax::ast::{AggregateFunction, ComparisonOperator, JoinType, Literal, PathOperand};
use std::collections::HashMap;
use tracing::debug;

const ROOT_ALIAS: &str = "t0";

/// Compiles filter queries into a single `SELECT` over a [`Schema`].
///
/// Every relation crossed by a path becomes a join. Joins are keyed by the
/// parent alias and the relation name, so `a.b.x = 1 AND a.b.y = 2` joins
/// `a` and `b` once each. The join type of the first comparison that crosses
/// a relation wins.
pub struct SqlBackend<'s> {
    schema: &'s Schema,
    joins: Vec<JoinClause>,
    join_aliases: HashMap<(String, String), String>,
    group_by: Vec<SqlExpr>,
    having: Option<SqlCondition>,
}

impl<'s> SqlBackend<'s> {
    pub fn new(schema: &'s Schema) -> Self {
        Self {
            schema,
            joins: Vec::new(),
            join_aliases: HashMap::new(),
            group_by: Vec::new(),
            having: None,
        }
    }

    pub fn joins(&self) -> &[JoinClause] {
        &self.joins
    }

    /// Assembles the `SELECT` from the compiled WHERE condition and the joins,
    /// grouping and HAVING condition collected while compiling it. An
    /// always-true WHERE is omitted.
    pub fn into_select(self, compiled: CompiledQuery<SqlCondition, SqlExpr>) -> Select {
        let where_clause = Some(compiled.primary).filter(|c| !c.is_true());

        Select {
            table: self.schema.root.clone(),
            alias: ROOT_ALIAS.to_string(),
            joins: self.joins,
            where_clause,
            group_by: self.group_by,
            having: self.having,
        }
    }

    /// Returns the alias for `relation` under `parent_alias`, joining it
    /// first if this is the first time it is crossed.
    fn join(
        &mut self,
        parent_alias: &str,
        relation_name: &str,
        table: &str,
        local_key: &str,
        foreign_key: &str,
        kind: JoinType,
    ) -> String {
        let key = (parent_alias.to_string(), relation_name.to_string());
        if let Some(alias) = self.join_aliases.get(&key) {
            debug!(parent = parent_alias, relation = relation_name, alias = %alias, "reusing join");
            return alias.clone();
        }

        let alias = format!("t{}", self.joins.len() + 1);
        self.joins.push(JoinClause {
            kind,
            table: table.to_string(),
            alias: alias.clone(),
            parent_alias: parent_alias.to_string(),
            local_key: local_key.to_string(),
            foreign_key: foreign_key.to_string(),
        });
        self.join_aliases.insert(key, alias.clone());

        debug!(parent = parent_alias, relation = relation_name, alias = %alias, %kind, "created join");
        alias
    }
}

impl Backend for SqlBackend<'_> {
    type Expr = SqlExpr;
    type Condition = SqlCondition;

    fn resolve_field(&mut self, path: &PathOperand, join: JoinType) -> Result<SqlExpr, BackendError> {
        let unknown_field = || BackendError::UnknownField { path: path.path() };
        let (field, relations) = path.identifiers().split_last().ok_or_else(unknown_field)?;

        let schema = self.schema;
        let mut table_name = schema.root.as_str();
        let mut alias = ROOT_ALIAS.to_string();

        for relation_name in relations {
            let relation = schema
                .table(table_name)
                .and_then(|table| table.relation(relation_name))
                .ok_or_else(|| BackendError::UnknownRelation {
                    owner: table_name.to_string(),
                    relation: relation_name.clone(),
                })?;

            alias = self.join(
                &alias,
                relation_name,
                &relation.table,
                &relation.local_key,
                &relation.foreign_key,
                join,
            );
            table_name = relation.table.as_str();
        }

        let known = schema
            .table(table_name)
            .is_some_and(|table| table.has_column(field));
        if !known {
            return Err(unknown_field());
        }

        Ok(SqlExpr::Column(Column {
            alias,
            name: field.clone(),
        }))
    }

    fn literal(&mut self, value: &Literal) -> SqlExpr {
        SqlExpr::Param(value.clone())
    }

    fn compare(&mut self, op: ComparisonOperator, left: SqlExpr, right: SqlExpr) -> SqlCondition {
        SqlCondition::Compare { op, left, right }
    }

    fn is_null(&mut self, expr: SqlExpr) -> SqlCondition {
        SqlCondition::IsNull(expr)
    }

    fn is_not_null(&mut self, expr: SqlExpr) -> SqlCondition {
        SqlCondition::IsNotNull(expr)
    }

    fn between(&mut self, expr: SqlExpr, low: SqlExpr, high: SqlExpr) -> SqlCondition {
        SqlCondition::Between { expr, low, high }
    }

    fn member_of(&mut self, expr: SqlExpr, values: Vec<SqlExpr>) -> SqlCondition {
        SqlCondition::In { expr, values }
    }

    fn aggregate(
        &mut self,
        function: AggregateFunction,
        target: AggregateTarget<SqlExpr>,
    ) -> Result<SqlExpr, BackendError> {
        let arg = match target {
            AggregateTarget::Wildcard if function == AggregateFunction::Count => None,
            AggregateTarget::Wildcard => {
                return Err(BackendError::Unsupported(format!("{function}(*)")));
            }
            AggregateTarget::Field(expr) => Some(Box::new(expr)),
        };
        Ok(SqlExpr::Aggregate { function, arg })
    }

    fn and(&mut self, left: SqlCondition, right: SqlCondition) -> SqlCondition {
        SqlCondition::And(Box::new(left), Box::new(right))
    }

    fn or(&mut self, left: SqlCondition, right: SqlCondition) -> SqlCondition {
        SqlCondition::Or(Box::new(left), Box::new(right))
    }

    fn identity(&mut self) -> SqlCondition {
        SqlCondition::True
    }

    fn apply_group_by(&mut self, exprs: &[SqlExpr]) {
        self.group_by = exprs.to_vec();
    }

    fn apply_having(&mut self, condition: &SqlCondition) {
        self.having = Some(condition.clone());
    }
}
