//! # Report Operations
//!
//! The owner-facing read side: period totals, the assembled report
//! payload, sales history search, and the activity calendar. Plus the one
//! aggregate everybody gets: the home dashboard.
//!
//! All of these are pure reads. Totals come from SQL sums, the payload is
//! assembled in `caja-core`, and profit is derived in exactly one place
//! ([`caja_core::PeriodTotals::profit`]) no matter which operation asked.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate, Utc};
use tracing::debug;

use caja_core::validation::validate_month;
use caja_core::{
    DashboardSummary, DayActivity, HistoryFilter, Period, PeriodTotals, ReportPayload,
    RequestContext, SaleLine,
};
use caja_db::Database;

use crate::error::ServiceResult;

#[derive(Debug, Clone)]
pub struct ReportService {
    db: Database,
}

impl ReportService {
    pub fn new(db: Database) -> Self {
        ReportService { db }
    }

    /// Sales and expense sums over a period. Owner only.
    pub async fn totals_over(
        &self,
        ctx: &RequestContext,
        period: Period,
    ) -> ServiceResult<PeriodTotals> {
        ctx.require_owner()?;
        Ok(self.db.reports().totals_over(period).await?)
    }

    /// Assembles the full report payload for a period. Owner only.
    pub async fn build_report(
        &self,
        ctx: &RequestContext,
        period: Period,
    ) -> ServiceResult<ReportPayload> {
        ctx.require_owner()?;

        let totals = self.db.reports().totals_over(period).await?;
        let sales_detail = self.db.reports().sales_detail(period).await?;
        let expenses_detail = self.db.reports().expenses_detail(period).await?;

        debug!(
            period = %period,
            sales = sales_detail.len(),
            expenses = expenses_detail.len(),
            "report assembled"
        );
        Ok(ReportPayload::new(period, totals, sales_detail, expenses_detail))
    }

    /// Sales history with optional period/product/user filters. Owner only.
    pub async fn search_history(
        &self,
        ctx: &RequestContext,
        filter: &HistoryFilter,
    ) -> ServiceResult<Vec<SaleLine>> {
        ctx.require_owner()?;
        let lines = self.db.reports().search_sales(filter).await?;
        debug!(hits = lines.len(), "history search");
        Ok(lines)
    }

    /// Per-day activity for one calendar month. Owner only.
    pub async fn calendar_month(
        &self,
        ctx: &RequestContext,
        year: i32,
        month: u32,
    ) -> ServiceResult<BTreeMap<NaiveDate, DayActivity>> {
        ctx.require_owner()?;
        validate_month(month)?;
        Ok(self.db.reports().daily_activity(year, month).await?)
    }

    /// The home dashboard: lifetime, today, and the rolling 7- and 30-day
    /// windows. Open to operators.
    pub async fn dashboard(&self, ctx: &RequestContext) -> ServiceResult<DashboardSummary> {
        ctx.require_operator()?;

        let today = Utc::now().date_naive();
        let reports = self.db.reports();

        let lifetime = reports.lifetime_totals().await?;
        let today_totals = reports.totals_over(Period::single_day(today)).await?;
        let last_7_days = reports.totals_since(today - Duration::days(7)).await?;
        let last_30_days = reports.totals_since(today - Duration::days(30)).await?;

        Ok(DashboardSummary {
            lifetime,
            today: today_totals,
            last_7_days,
            last_30_days,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
