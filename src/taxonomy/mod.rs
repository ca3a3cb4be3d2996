//! Category taxonomy: the fixed two-level mapping from entry categories to
//! income-statement groups.
//!
//! The table is configuration data, not code: a built-in pt-BR default ships
//! with the crate and alternative tables load from JSON. Classification is a
//! lookup plus a lenient fallback; entries with unknown categories are never
//! dropped and never rejected.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::EngineError;
use crate::ledger::EntryKind;

/// Group label applied to revenue entries with no taxonomy match.
pub const FALLBACK_REVENUE_GROUP: &str = "Outras Receitas";
/// Group label applied to expense entries with no taxonomy match.
pub const FALLBACK_EXPENSE_GROUP: &str = "Outras Despesas";

/// Where a revenue group lands on the income statement.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RevenueRole {
    Operating,
    Financial,
    Other,
}

/// Where an expense group lands on the income statement.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseRole {
    Deduction,
    CostOfSales,
    Operating,
    Financial,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RevenueGroup {
    pub name: String,
    pub role: RevenueRole,
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExpenseGroup {
    pub name: String,
    pub role: ExpenseRole,
    pub categories: Vec<String>,
}

/// Outcome of classifying one entry category.
///
/// `matched` is false when the category fell through to the fallback group;
/// totals are unaffected, but reports surface the label as a data-quality
/// diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Revenue {
        group: String,
        role: RevenueRole,
        matched: bool,
    },
    Expense {
        group: String,
        role: ExpenseRole,
        matched: bool,
    },
}

/// Two-level category table, kept separately for revenue and expense.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryTaxonomy {
    pub revenue: Vec<RevenueGroup>,
    pub expense: Vec<ExpenseGroup>,
}

impl CategoryTaxonomy {
    /// Built-in pt-BR table used by the dashboard.
    pub fn builtin() -> &'static CategoryTaxonomy {
        &BUILTIN
    }

    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, EngineError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Exact-string lookup against the table for the entry's kind.
    ///
    /// Unknown categories classify into the "Outras" group of their kind:
    /// operating revenue or operating expense. Every entry stays inside the
    /// totals; misses are traced and flagged for the report diagnostics.
    pub fn classify(&self, kind: EntryKind, category: &str) -> Classification {
        match kind {
            EntryKind::Revenue => {
                for group in &self.revenue {
                    if group.categories.iter().any(|c| c == category) {
                        return Classification::Revenue {
                            group: group.name.clone(),
                            role: group.role,
                            matched: true,
                        };
                    }
                }
                tracing::debug!(%category, "revenue category not in taxonomy; using fallback group");
                Classification::Revenue {
                    group: FALLBACK_REVENUE_GROUP.to_string(),
                    role: RevenueRole::Operating,
                    matched: false,
                }
            }
            EntryKind::Expense => {
                for group in &self.expense {
                    if group.categories.iter().any(|c| c == category) {
                        return Classification::Expense {
                            group: group.name.clone(),
                            role: group.role,
                            matched: true,
                        };
                    }
                }
                tracing::debug!(%category, "expense category not in taxonomy; using fallback group");
                Classification::Expense {
                    group: FALLBACK_EXPENSE_GROUP.to_string(),
                    role: ExpenseRole::Operating,
                    matched: false,
                }
            }
        }
    }
}

impl Default for CategoryTaxonomy {
    fn default() -> Self {
        BUILTIN.clone()
    }
}

static BUILTIN: Lazy<CategoryTaxonomy> = Lazy::new(|| CategoryTaxonomy {
    revenue: vec![
        revenue_group(
            "Receitas Operacionais",
            RevenueRole::Operating,
            &[
                "Vendas de Produtos",
                "Vendas de Mercadorias",
                "Prestação de Serviços",
            ],
        ),
        revenue_group(
            "Receitas Financeiras",
            RevenueRole::Financial,
            &[
                "Rendimentos de Aplicações",
                "Juros Recebidos",
                "Descontos Obtidos",
            ],
        ),
        revenue_group(
            FALLBACK_REVENUE_GROUP,
            RevenueRole::Other,
            &["Venda de Imobilizado", "Receitas Eventuais"],
        ),
    ],
    expense: vec![
        expense_group(
            "Deduções da Receita",
            ExpenseRole::Deduction,
            &[
                "ICMS sobre Vendas",
                "ISS sobre Serviços",
                "PIS/COFINS",
                "Simples Nacional",
                "Devoluções e Abatimentos",
            ],
        ),
        expense_group(
            "Custos",
            ExpenseRole::CostOfSales,
            &[
                "Custo dos Produtos Vendidos (CPV)",
                "Custo das Mercadorias Vendidas (CMV)",
                "Custo dos Serviços Prestados (CSP)",
                "Frete sobre Compras",
            ],
        ),
        expense_group(
            "Despesas Operacionais",
            ExpenseRole::Operating,
            &[
                "Salários e Encargos",
                "Pró-labore",
                "Aluguel",
                "Energia Elétrica",
                "Água e Esgoto",
                "Internet e Telefone",
                "Marketing e Publicidade",
                "Contabilidade",
                "Material de Escritório",
                "Manutenção e Reparos",
                "Transporte e Combustível",
                "Softwares e Assinaturas",
            ],
        ),
        expense_group(
            "Despesas Financeiras",
            ExpenseRole::Financial,
            &["Juros Pagos", "Tarifas Bancárias", "IOF", "Multas e Encargos"],
        ),
        expense_group(
            FALLBACK_EXPENSE_GROUP,
            ExpenseRole::Operating,
            &["Despesas Eventuais"],
        ),
    ],
});

fn revenue_group(name: &str, role: RevenueRole, categories: &[&str]) -> RevenueGroup {
    RevenueGroup {
        name: name.to_string(),
        role,
        categories: categories.iter().map(|c| c.to_string()).collect(),
    }
}

fn expense_group(name: &str, role: ExpenseRole, categories: &[&str]) -> ExpenseGroup {
    ExpenseGroup {
        name: name.to_string(),
        role,
        categories: categories.iter().map(|c| c.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_each_expense_role() {
        let taxonomy = CategoryTaxonomy::builtin();
        let cases = [
            ("ICMS sobre Vendas", ExpenseRole::Deduction),
            ("Custo dos Produtos Vendidos (CPV)", ExpenseRole::CostOfSales),
            ("Salários e Encargos", ExpenseRole::Operating),
            ("Tarifas Bancárias", ExpenseRole::Financial),
        ];
        for (category, expected) in cases {
            match taxonomy.classify(EntryKind::Expense, category) {
                Classification::Expense { role, matched, .. } => {
                    assert_eq!(role, expected, "category {category}");
                    assert!(matched);
                }
                other => panic!("expected expense classification, got {other:?}"),
            }
        }
    }

    #[test]
    fn classifies_revenue_roles() {
        let taxonomy = CategoryTaxonomy::builtin();
        match taxonomy.classify(EntryKind::Revenue, "Juros Recebidos") {
            Classification::Revenue { role, .. } => assert_eq!(role, RevenueRole::Financial),
            other => panic!("unexpected classification: {other:?}"),
        }
        match taxonomy.classify(EntryKind::Revenue, "Venda de Imobilizado") {
            Classification::Revenue { role, matched, .. } => {
                assert_eq!(role, RevenueRole::Other);
                assert!(matched);
            }
            other => panic!("unexpected classification: {other:?}"),
        }
    }

    #[test]
    fn unknown_categories_fall_back_without_being_dropped() {
        let taxonomy = CategoryTaxonomy::builtin();
        match taxonomy.classify(EntryKind::Revenue, "Categoria Digitada Errada") {
            Classification::Revenue { group, role, matched } => {
                assert_eq!(group, FALLBACK_REVENUE_GROUP);
                assert_eq!(role, RevenueRole::Operating);
                assert!(!matched);
            }
            other => panic!("unexpected classification: {other:?}"),
        }
        match taxonomy.classify(EntryKind::Expense, "Gasto Sem Categoria") {
            Classification::Expense { group, role, matched } => {
                assert_eq!(group, FALLBACK_EXPENSE_GROUP);
                assert_eq!(role, ExpenseRole::Operating);
                assert!(!matched);
            }
            other => panic!("unexpected classification: {other:?}"),
        }
    }

    #[test]
    fn json_round_trip_preserves_classification() {
        let taxonomy = CategoryTaxonomy::builtin();
        let json = taxonomy.to_json().unwrap();
        let reloaded = CategoryTaxonomy::from_json(&json).unwrap();
        assert_eq!(&reloaded, taxonomy);
        assert_eq!(
            reloaded.classify(EntryKind::Expense, "Aluguel"),
            taxonomy.classify(EntryKind::Expense, "Aluguel"),
        );
    }

    #[test]
    fn every_category_belongs_to_exactly_one_group() {
        let taxonomy = CategoryTaxonomy::builtin();
        let mut seen = std::collections::HashSet::new();
        for group in &taxonomy.expense {
            for category in &group.categories {
                assert!(seen.insert(category.clone()), "duplicated: {category}");
            }
        }
        seen.clear();
        for group in &taxonomy.revenue {
            for category in &group.categories {
                assert!(seen.insert(category.clone()), "duplicated: {category}");
            }
        }
    }
}
