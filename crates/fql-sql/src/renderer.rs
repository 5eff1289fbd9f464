//! Defines the core rendering trait and context for converting the SQL tree
//! to text.

use crate::{
    ast::{Column, JoinClause, Select, SqlCondition, SqlExpr},
    dialect::Dialect,
};
use fql_syntax::ast::{ComparisonOperator, Literal};

/// A trait for any SQL node that can be rendered into a SQL string.
pub trait Render {
    fn render(&self, renderer: &mut Renderer);
}

/// Accumulates the SQL string and the bound parameters, and provides access
/// to the dialect for syntax-specific details.
pub struct Renderer<'a> {
    pub sql: String,
    pub params: Vec<Literal>,
    pub dialect: &'a dyn Dialect,
}

impl<'a> Renderer<'a> {
    pub fn new(dialect: &'a dyn Dialect) -> Self {
        Self {
            sql: String::new(),
            params: Vec::new(),
            dialect,
        }
    }

    /// Consumes the renderer and returns the final SQL string and parameters.
    pub fn finish(self) -> (String, Vec<Literal>) {
        (self.sql, self.params)
    }

    pub fn add_param(&mut self, value: Literal) {
        self.params.push(value);
        let placeholder = self.dialect.placeholder(self.params.len() - 1);
        self.sql.push_str(&placeholder);
    }

    fn push_qualified(&mut self, alias: &str, name: &str) {
        let alias = self.dialect.quote_identifier(alias);
        let name = self.dialect.quote_identifier(name);
        self.sql.push_str(&alias);
        self.sql.push('.');
        self.sql.push_str(&name);
    }

    fn render_list(&mut self, items: &[SqlExpr]) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.sql.push_str(", ");
            }
            item.render(self);
        }
    }

    /// Renders `condition`, parenthesised when it binds looser than its parent.
    fn render_nested(&mut self, condition: &SqlCondition, parent: u8) {
        if precedence(condition) < parent {
            self.sql.push('(');
            condition.render(self);
            self.sql.push(')');
        } else {
            condition.render(self);
        }
    }
}

fn precedence(condition: &SqlCondition) -> u8 {
    match condition {
        SqlCondition::Or(..) => 1,
        SqlCondition::And(..) => 2,
        _ => 3,
    }
}

fn sql_operator(op: ComparisonOperator) -> &'static str {
    match op {
        ComparisonOperator::Ne => "<>",
        other => other.symbol(),
    }
}

impl Render for Column {
    fn render(&self, r: &mut Renderer) {
        r.push_qualified(&self.alias, &self.name);
    }
}

impl Render for SqlExpr {
    fn render(&self, r: &mut Renderer) {
        match self {
            SqlExpr::Column(column) => column.render(r),
            SqlExpr::Param(value) => r.add_param(value.clone()),
            SqlExpr::Aggregate { function, arg } => {
                r.sql.push_str(function.name());
                r.sql.push('(');
                match arg {
                    Some(arg) => arg.render(r),
                    None => r.sql.push('*'),
                }
                r.sql.push(')');
            }
        }
    }
}

impl Render for SqlCondition {
    fn render(&self, r: &mut Renderer) {
        match self {
            SqlCondition::True => r.sql.push_str("1 = 1"),
            SqlCondition::Compare { op, left, right } => {
                left.render(r);
                r.sql.push(' ');
                r.sql.push_str(sql_operator(*op));
                r.sql.push(' ');
                right.render(r);
            }
            SqlCondition::IsNull(expr) => {
                expr.render(r);
                r.sql.push_str(" IS NULL");
            }
            SqlCondition::IsNotNull(expr) => {
                expr.render(r);
                r.sql.push_str(" IS NOT NULL");
            }
            SqlCondition::Between { expr, low, high } => {
                expr.render(r);
                r.sql.push_str(" BETWEEN ");
                low.render(r);
                r.sql.push_str(" AND ");
                high.render(r);
            }
            SqlCondition::In { expr, values } => {
                expr.render(r);
                r.sql.push_str(" IN (");
                r.render_list(values);
                r.sql.push(')');
            }
            SqlCondition::And(left, right) => {
                r.render_nested(left, 2);
                r.sql.push_str(" AND ");
                r.render_nested(right, 2);
            }
            SqlCondition::Or(left, right) => {
                r.render_nested(left, 1);
                r.sql.push_str(" OR ");
                r.render_nested(right, 1);
            }
        }
    }
}

impl Render for JoinClause {
    fn render(&self, r: &mut Renderer) {
        r.sql.push_str(&self.kind.to_string());
        r.sql.push(' ');
        r.sql.push_str(&r.dialect.quote_identifier(&self.table));
        r.sql.push_str(" AS ");
        r.sql.push_str(&r.dialect.quote_identifier(&self.alias));
        r.sql.push_str(" ON ");
        r.push_qualified(&self.parent_alias, &self.local_key);
        r.sql.push_str(" = ");
        r.push_qualified(&self.alias, &self.foreign_key);
    }
}

impl Render for Select {
    fn render(&self, r: &mut Renderer) {
        r.sql.push_str("SELECT ");
        if self.group_by.is_empty() {
            r.sql.push('*');
        } else {
            r.render_list(&self.group_by);
        }
        r.sql.push_str(" FROM ");
        r.sql.push_str(&r.dialect.quote_identifier(&self.table));
        r.sql.push_str(" AS ");
        r.sql.push_str(&r.dialect.quote_identifier(&self.alias));

        for join in &self.joins {
            r.sql.push(' ');
            join.render(r);
        }

        if let Some(condition) = &self.where_clause {
            r.sql.push_str(" WHERE ");
            condition.render(r);
        }

        if !self.group_by.is_empty() {
            r.sql.push_str(" GROUP BY ");
            r.render_list(&self.group_by);
        }

        if let Some(condition) = &self.having {
            r.sql.push_str(" HAVING ");
            condition.render(r);
        }
    }
}
