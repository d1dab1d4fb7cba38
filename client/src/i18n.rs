//! English/Arabic dashboard strings
//!
//! Small typed catalog for the vocabulary the reports use. Arabic falls
//! back to English for any string without a translation yet.

use shared::types::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKey {
    DashboardTitle,
    LowStockAlerts,
    LowSellingProducts,
    NoAlerts,
    DailyTotals,
    DailyProfit,
    Revenue,
    Cogs,
    Profit,
    Total,
    Months,
    In,
    Out,
    Net,
    Stock,
    MinStock,
    SoldLast7Days,
    ExpectedWeekly,
    LoggedInAs,
    ExportedTo,
}

fn english(key: MessageKey) -> &'static str {
    use MessageKey::*;
    match key {
        DashboardTitle => "Cafe dashboard",
        LowStockAlerts => "Low stock alerts",
        LowSellingProducts => "Low-selling products",
        NoAlerts => "No alerts",
        DailyTotals => "Daily totals",
        DailyProfit => "Daily profit",
        Revenue => "Revenue",
        Cogs => "COGS",
        Profit => "Profit",
        Total => "Total",
        Months => "Months",
        In => "In",
        Out => "Out",
        Net => "Net",
        Stock => "Stock",
        MinStock => "Min stock",
        SoldLast7Days => "Sold (7 days)",
        ExpectedWeekly => "Expected weekly",
        LoggedInAs => "Logged in as",
        ExportedTo => "Exported to",
    }
}

fn arabic(key: MessageKey) -> Option<&'static str> {
    use MessageKey::*;
    match key {
        DashboardTitle => Some("لوحة المقهى"),
        LowStockAlerts => Some("تنبيهات انخفاض المخزون"),
        LowSellingProducts => Some("منتجات منخفضة المبيعات"),
        NoAlerts => Some("لا توجد تنبيهات"),
        DailyTotals => Some("الإجماليات اليومية"),
        DailyProfit => Some("الربح اليومي"),
        Revenue => Some("الإيرادات"),
        Cogs => Some("تكلفة البضاعة"),
        Profit => Some("الربح"),
        Total => Some("الإجمالي"),
        Months => Some("الأشهر"),
        In => Some("وارد"),
        Out => Some("صادر"),
        Net => Some("الصافي"),
        Stock => Some("المخزون"),
        MinStock => Some("الحد الأدنى للمخزون"),
        SoldLast7Days => Some("المبيعات (7 أيام)"),
        ExpectedWeekly => Some("المتوقع أسبوعياً"),
        LoggedInAs => Some("تم تسجيل الدخول باسم"),
        ExportedTo => Some("تم التصدير إلى"),
    }
}

/// Resolve a message in the requested language
pub fn text(language: Language, key: MessageKey) -> &'static str {
    match language {
        Language::English => english(key),
        Language::Arabic => arabic(key).unwrap_or_else(|| english(key)),
    }
}
