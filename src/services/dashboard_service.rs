// src/services/dashboard_service.rs

use chrono::{DateTime, Days, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use rust_decimal::Decimal;

use crate::models::{
    dashboard::{Bucket, CategoryResume, PaymentMethod, ResumeReport, ResumeTotals},
    sales::{MonthlyMeta, OrderRecord, PaymentStatus, SaleRecord, WEB_STORE_ID},
};

// O que o agregador precisa saber de um registro (venda ou ordem de compra)
pub trait Resumable {
    fn created_at(&self) -> Option<&str>;
    fn amount(&self) -> Decimal;
    fn status(&self) -> PaymentStatus;
    fn payment_type(&self) -> &str;
    fn store_id(&self) -> &str;
}

impl Resumable for SaleRecord {
    fn created_at(&self) -> Option<&str> {
        self.created_at.as_deref()
    }
    fn amount(&self) -> Decimal {
        self.total
    }
    fn status(&self) -> PaymentStatus {
        self.status
    }
    fn payment_type(&self) -> &str {
        &self.payment_type
    }
    fn store_id(&self) -> &str {
        &self.store_id
    }
}

impl Resumable for OrderRecord {
    fn created_at(&self) -> Option<&str> {
        self.created_at.as_deref()
    }
    fn amount(&self) -> Decimal {
        self.total
    }
    fn status(&self) -> PaymentStatus {
        self.status
    }
    fn payment_type(&self) -> &str {
        &self.order_type
    }
    fn store_id(&self) -> &str {
        &self.store_id
    }
}

/// Web sempre é cartão; fora isso, só é dinheiro se o tipo menciona "efectivo".
pub fn classify_payment(store_id: &str, payment_type: &str) -> PaymentMethod {
    if store_id == WEB_STORE_ID || !payment_type.to_lowercase().contains("efectivo") {
        PaymentMethod::DebitoCredito
    } else {
        PaymentMethod::Efectivo
    }
}

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Lê um timestamp ISO 8601 e o leva para o fuso de `tz`.
///
/// - Com offset (`2026-10-19T14:30:00-03:00`, `...Z`): convertido.
/// - Sem offset (`2026-10-19T14:30:00`): hora local do fuso `tz`.
/// - Só data (`2026-10-19`): meia-noite UTC, depois convertido.
pub fn parse_timestamp<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(tz));
    }
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return Some(dt.with_timezone(tz));
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return tz.from_local_datetime(&naive).earliest();
        }
    }

    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    let midnight = date.and_hms_opt(0, 0, 0)?;
    Some(Utc.from_utc_datetime(&midnight).with_timezone(tz))
}

// Datas de referência, calculadas uma vez por chamada
struct Window {
    today: NaiveDate,
    yesterday: NaiveDate,
    week_start: NaiveDate,
}

impl Window {
    fn at<Tz: TimeZone>(now: &DateTime<Tz>) -> Self {
        let today = now.date_naive();
        Self {
            today,
            yesterday: today.checked_sub_days(Days::new(1)).unwrap_or(NaiveDate::MIN),
            week_start: today.checked_sub_days(Days::new(6)).unwrap_or(NaiveDate::MIN),
        }
    }
}

fn tally_category<R, Tz>(records: &[R], now: &DateTime<Tz>, skipped: &mut u64) -> CategoryResume
where
    R: Resumable,
    Tz: TimeZone,
{
    let window = Window::at(now);
    let tz = now.timezone();
    let mut resume = CategoryResume::default();

    for record in records {
        // Timestamp ilegível: fica fora de TODOS os baldes, inclusive o mês.
        let Some(created) = record.created_at().and_then(|raw| parse_timestamp(raw, &tz)) else {
            *skipped += 1;
            continue;
        };
        let day = created.date_naive();
        let amount = record.amount();
        let method = record
            .status()
            .is_paid()
            .then(|| classify_payment(record.store_id(), record.payment_type()));

        let buckets: [(&mut Bucket, bool); 4] = [
            (&mut resume.month, true),
            (&mut resume.today, day == window.today),
            (&mut resume.yesterday, day == window.yesterday),
            (&mut resume.last7, day >= window.week_start && day <= window.today),
        ];
        for (bucket, applies) in buckets {
            if applies {
                bucket.record(amount, method);
            }
        }
    }

    resume
}

/// Percentual do total do mês sobre a meta, com 2 casas. Sem meta = 0.
/// Se a razão não cabe num `Decimal`, satura no limite com o sinal do total.
pub fn progress_percentage(month_amount: Decimal, meta: Option<&MonthlyMeta>) -> Decimal {
    match meta {
        Some(m) if m.meta > Decimal::ZERO => month_amount
            .checked_div(m.meta)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .map(|pct| pct.round_dp(2))
            .unwrap_or(if month_amount.is_sign_negative() { Decimal::MIN } else { Decimal::MAX }),
        _ => Decimal::ZERO,
    }
}

/// Resumo de vendas e ordens de compra em relação a `now`.
pub fn compute_full_resume<Tz: TimeZone>(
    sales: &[SaleRecord],
    orders: &[OrderRecord],
    monthly_meta: Option<MonthlyMeta>,
    now: &DateTime<Tz>,
) -> ResumeReport {
    let mut skipped = 0;
    let totals = ResumeTotals {
        sales: tally_category(sales, now, &mut skipped),
        orders: tally_category(orders, now, &mut skipped),
    };

    if skipped > 0 {
        tracing::debug!(skipped, "Registros sem timestamp válido ignorados no resumo");
    }

    let progress = progress_percentage(totals.sales.month.total.amount, monthly_meta.as_ref());

    ResumeReport {
        totals,
        monthly_meta,
        progress,
        skipped,
    }
}

/// Resumo só de vendas (categoria `orders` fica zerada).
pub fn compute_resume<Tz: TimeZone>(
    sales: &[SaleRecord],
    monthly_meta: Option<MonthlyMeta>,
    now: &DateTime<Tz>,
) -> ResumeReport {
    compute_full_resume(sales, &[], monthly_meta, now)
}

#[derive(Clone)]
pub struct DashboardService {
    offset: FixedOffset,
}

impl DashboardService {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Hora atual no fuso configurado da loja.
    pub fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.offset)
    }

    pub fn get_resume(
        &self,
        sales: &[SaleRecord],
        orders: &[OrderRecord],
        monthly_meta: Option<MonthlyMeta>,
        now: Option<DateTime<FixedOffset>>,
    ) -> ResumeReport {
        // O "agora" do chamador é levado ao fuso da loja para definir os dias
        let now = now
            .map(|n| n.with_timezone(&self.offset))
            .unwrap_or_else(|| self.now());
        compute_full_resume(sales, orders, monthly_meta, &now)
    }
}
