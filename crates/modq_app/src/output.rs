use chrono::DateTime;
use modq_core::{Advertisement, BulkReport, ListViewModel, Moderator, StatsReport};

/// Renders an RFC 3339 timestamp as `YYYY-MM-DD HH:MM`; anything else is shown as is.
pub fn short_time(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|time| time.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

pub fn print_page(view: &ListViewModel) {
    if view.rows.is_empty() {
        println!("No ads match the current filter.");
    }
    for row in &view.rows {
        println!(
            "{:>6}  {:<9} {:<7} {:>12.2}  {:<16}  {}  {}",
            row.id,
            row.status.as_str(),
            format!("{:?}", row.priority).to_lowercase(),
            row.price,
            short_time(&row.created_at),
            row.category,
            row.title
        );
    }
    let pagination = &view.pagination;
    println!(
        "page {}/{} ({} ads)",
        pagination.current_page, pagination.total_pages, pagination.total_items
    );
}

pub fn print_ad(ad: &Advertisement) {
    println!("#{} {}", ad.id, ad.title);
    println!("status:   {}", ad.status);
    println!("price:    {:.2}", ad.price);
    println!("category: {}", ad.category);
    println!("created:  {}", short_time(&ad.created_at));
    if !ad.description.is_empty() {
        println!();
        println!("{}", ad.description);
    }
}

pub fn print_report(report: &BulkReport) {
    println!(
        "{} succeeded, {} failed",
        report.succeeded.len(),
        report.failed.len()
    );
    for (id, reason) in &report.failed {
        println!("  #{id}: {reason}");
    }
}

pub fn print_stats(report: &StatsReport) {
    let summary = &report.summary;
    println!(
        "reviewed: {} total, {} today, {} this week, {} this month",
        summary.total_reviewed,
        summary.total_reviewed_today,
        summary.total_reviewed_this_week,
        summary.total_reviewed_this_month
    );
    println!(
        "decisions: {:.1}% approved, {:.1}% rejected, {:.1}% sent back",
        summary.approved_percentage, summary.rejected_percentage, summary.request_changes_percentage
    );
    println!("average review time: {:.0}s", summary.average_review_time);
    if !report.activity.is_empty() {
        println!();
        for day in &report.activity {
            println!(
                "{}  +{} -{} ~{}",
                day.date, day.approved, day.rejected, day.request_changes
            );
        }
    }
    if !report.categories.is_empty() {
        println!();
        for (category, count) in &report.categories {
            println!("{count:>6}  {category}");
        }
    }
}

/// The report in the CSV layout the web dashboard exports.
pub fn stats_csv(report: &StatsReport) -> String {
    let summary = &report.summary;
    let decisions = &report.decisions;
    let mut rows = vec![
        "Статистика модератора".to_string(),
        String::new(),
        "Общая статистика".to_string(),
        format!("Всего проверено,{}", summary.total_reviewed),
        format!("Проверено сегодня,{}", summary.total_reviewed_today),
        format!("Проверено за неделю,{}", summary.total_reviewed_this_week),
        format!("Проверено за месяц,{}", summary.total_reviewed_this_month),
        format!("Процент одобренных,{}%", summary.approved_percentage),
        format!("Процент отклоненных,{}%", summary.rejected_percentage),
        format!("Процент на доработку,{}%", summary.request_changes_percentage),
        format!("Среднее время проверки,{} сек", summary.average_review_time),
        String::new(),
        "Активность по дням".to_string(),
        "Дата,Одобрено,Отклонено,На доработку".to_string(),
    ];
    rows.extend(report.activity.iter().map(|day| {
        format!(
            "{},{},{},{}",
            day.date, day.approved, day.rejected, day.request_changes
        )
    }));
    rows.extend([
        String::new(),
        "Распределение решений".to_string(),
        format!("Одобрено,{}%", decisions.approved),
        format!("Отклонено,{}%", decisions.rejected),
        format!("На доработку,{}%", decisions.request_changes),
        String::new(),
        "Распределение по категориям".to_string(),
        "Категория,Количество".to_string(),
    ]);
    rows.extend(
        report
            .categories
            .iter()
            .map(|(category, count)| format!("{category},{count}")),
    );
    rows.join("\n")
}

pub fn print_moderator(moderator: &Moderator) {
    println!("#{} {}", moderator.id, moderator.name);
    if !moderator.email.is_empty() {
        println!("email: {}", moderator.email);
    }
    if !moderator.role.is_empty() {
        println!("role:  {}", moderator.role);
    }
}

#[cfg(test)]
mod tests {
    use modq_core::{ActivityPoint, StatsReport, StatsSummary};

    use super::{short_time, stats_csv};

    #[test]
    fn rfc3339_is_shortened() {
        assert_eq!(short_time("2026-10-01T10:15:42Z"), "2026-10-01 10:15");
    }

    #[test]
    fn unparsable_time_is_kept() {
        assert_eq!(short_time("yesterday"), "yesterday");
    }

    #[test]
    fn csv_lists_sections_in_dashboard_order() {
        let report = StatsReport {
            summary: StatsSummary {
                total_reviewed: 40,
                approved_percentage: 62.5,
                average_review_time: 90.0,
                ..StatsSummary::default()
            },
            activity: vec![ActivityPoint {
                date: "2026-10-01".to_string(),
                approved: 3,
                rejected: 1,
                request_changes: 0,
            }],
            categories: [("Авто".to_string(), 7)].into_iter().collect(),
            ..StatsReport::default()
        };

        let csv = stats_csv(&report);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Статистика модератора");
        assert_eq!(lines[3], "Всего проверено,40");
        assert_eq!(lines[7], "Процент одобренных,62.5%");
        assert_eq!(lines[10], "Среднее время проверки,90 сек");
        assert_eq!(lines[14], "2026-10-01,3,1,0");
        assert_eq!(lines.last(), Some(&"Авто,7"));
    }
}
