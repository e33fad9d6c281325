use crate::domain::value_objects::{
    month_year::MonthYear,
    subscriptions::SubscriptionModel,
    summary::{ReportWindow, SubscriptionCostModel, SubscriptionSummaryModel},
};

/// Prices every subscription over `window` and totals the result.
///
/// The effective interval is the subscription's `[start_date, end_date]` clipped to the
/// window, with an open `end_date` running to `window.to`. Subscriptions entirely outside
/// the window are kept and priced with the raw (zero or negative) month count.
pub fn summarize(
    window: ReportWindow,
    subscriptions: &[SubscriptionModel],
) -> SubscriptionSummaryModel {
    let subscriptions: Vec<SubscriptionCostModel> = subscriptions
        .iter()
        .map(|subscription| price_subscription(window, subscription))
        .collect();

    let total_cost = subscriptions.iter().map(|entry| entry.cost).sum();

    SubscriptionSummaryModel {
        total_cost,
        subscriptions,
    }
}

pub fn price_subscription(
    window: ReportWindow,
    subscription: &SubscriptionModel,
) -> SubscriptionCostModel {
    let effective_from = subscription.start_date.max(window.from);
    let effective_to = effective_end(subscription.end_date, window.to);
    let months = effective_from.months_through(effective_to);

    SubscriptionCostModel {
        subscription: subscription.clone(),
        effective_from,
        effective_to,
        cost: months * i64::from(subscription.price),
    }
}

fn effective_end(end_date: Option<MonthYear>, window_to: MonthYear) -> MonthYear {
    match end_date {
        Some(end_date) => end_date.min(window_to),
        None => window_to,
    }
}
