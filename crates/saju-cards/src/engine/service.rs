//! Service facade binding the injected catalog and pillar oracle.
//!
//! Each entry point is a pure function of its inputs apart from the two
//! external reads; the service holds no mutable state, so concurrent calls
//! are safe by construction.

use std::sync::Arc;

use super::facts::derive_facts;
use super::fortune::fortune_chart;
use super::pair::{derive_pair_facts, PairTokenSets};
use super::select::{select_pair_cards, select_saju_cards, Selection, SelectionLimits};
use super::tokens::TokenSet;
use crate::catalog::{CardCatalog, CardScope, CatalogError};
use crate::config::EngineConfig;
use crate::pillars::oracle::{BirthInput, OracleError, PillarOracle};
use crate::pillars::{Chart, ChartError, Gender};

pub struct SelectionService<C, O> {
    catalog: Arc<C>,
    oracle: Arc<O>,
    limits: SelectionLimits,
}

impl<C, O> SelectionService<C, O>
where
    C: CardCatalog,
    O: PillarOracle,
{
    pub fn new(catalog: Arc<C>, oracle: Arc<O>, limits: SelectionLimits) -> Self {
        Self {
            catalog,
            oracle,
            limits,
        }
    }

    pub fn from_config(catalog: Arc<C>, oracle: Arc<O>, config: &EngineConfig) -> Self {
        Self::new(catalog, oracle, config.selection.limits())
    }

    fn chart_for(&self, birth: &BirthInput) -> Result<Chart, SelectionError> {
        let chart = self.oracle.pillars_from_birth(birth)?;
        chart.validate()?;
        Ok(chart)
    }

    /// Single-profile selection for one birth.
    pub fn select_for_birth(&self, birth: &BirthInput) -> Result<Selection, SelectionError> {
        let chart = self.chart_for(birth)?;
        let tokens = TokenSet::from_facts(&derive_facts(&chart));
        let cards = self.catalog.list_published(CardScope::Saju)?;
        Ok(select_saju_cards(cards, &tokens, self.limits))
    }

    /// Single-profile selection against the shifted great-fortune chart for
    /// the given period step.
    pub fn select_for_fortune_period(
        &self,
        birth: &BirthInput,
        gender: Gender,
        step: u32,
    ) -> Result<Selection, SelectionError> {
        let chart = self.chart_for(birth)?;
        let period_chart = fortune_chart(&chart, gender, step);
        let tokens = TokenSet::from_facts(&derive_facts(&period_chart));
        let cards = self.catalog.list_published(CardScope::Saju)?;
        Ok(select_saju_cards(cards, &tokens, self.limits))
    }

    /// Two-profile selection: A and B keep their own token sets, the
    /// position-aligned pair facts form the third.
    pub fn select_for_pair(
        &self,
        birth_a: &BirthInput,
        birth_b: &BirthInput,
    ) -> Result<Selection, SelectionError> {
        let chart_a = self.chart_for(birth_a)?;
        let chart_b = self.chart_for(birth_b)?;

        let sets = PairTokenSets::new(
            TokenSet::from_facts(&derive_facts(&chart_a)),
            TokenSet::from_facts(&derive_facts(&chart_b)),
            TokenSet::from_facts(&derive_pair_facts(&chart_a, &chart_b)),
        );
        let cards = self.catalog.list_published(CardScope::Pair)?;
        Ok(select_pair_cards(cards, &sets, self.limits))
    }
}

/// Failure of one selection call. Everything here is fatal for the request
/// that raised it; per-card payload problems never surface this way.
#[derive(Debug, thiserror::Error)]
pub enum SelectionError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Oracle(#[from] OracleError),
    #[error(transparent)]
    Chart(#[from] ChartError),
}
