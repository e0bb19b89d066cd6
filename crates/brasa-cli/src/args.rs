//! Command-line arguments.
//!
//! Clap structures live here and convert into core types with `From`, so
//! `brasa-core` stays free of clap.

use std::path::PathBuf;

use brasa_core::models::{LineItem, NewOrder, OrderFilter, OrderStatus, Role};
use clap::{Args as ClapArgs, Parser, Subcommand};
use jiff::civil::Date;

/// Order lifecycle dashboard for the pizzeria counter, kitchen and drivers
///
/// Orders go pending → preparing → ready → out for delivery → delivered.
/// Kitchen staff move the first two steps, drivers the last two.
#[derive(Parser)]
#[command(version, about, name = "brasa")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/brasa/brasa.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Enter and inspect orders
    #[command(alias = "o")]
    Order {
        #[command(subcommand)]
        command: OrderCommands,
    },
    /// Kitchen moves: start preparing, mark ready
    #[command(alias = "k")]
    Kitchen {
        #[command(subcommand)]
        command: KitchenCommands,
    },
    /// Driver moves: start route, confirm delivery
    #[command(alias = "d")]
    Driver {
        #[command(subcommand)]
        command: DriverCommands,
    },
    /// Clock in and out
    Shift {
        #[command(subcommand)]
        command: ShiftCommands,
    },
    /// Production and delivery figures
    Stats {
        #[command(subcommand)]
        command: StatsCommands,
    },
    /// Follow a role's queue live until Ctrl-C
    Watch(WatchArgs),
}

#[derive(Subcommand)]
pub enum OrderCommands {
    /// Enter a new order
    Add(AddOrderArgs),
    /// List orders, optionally as one role's queue
    List(ListOrdersArgs),
    /// Show one order
    Show(OrderIdArgs),
    /// Recent orders, newest first
    History(OrderHistoryArgs),
}

#[derive(Subcommand)]
pub enum KitchenCommands {
    /// Claim a pending order and start preparing it
    Start(MoveArgs),
    /// Mark an order in preparation as ready
    Ready(MoveArgs),
}

#[derive(Subcommand)]
pub enum DriverCommands {
    /// Take a ready order on the road
    Start(MoveArgs),
    /// Confirm an order was handed over
    Deliver(MoveArgs),
}

#[derive(Subcommand)]
pub enum ShiftCommands {
    /// Open a shift for today
    In(UserArgs),
    /// Close the open shift
    Out(UserArgs),
    /// Show the open shift and recent history
    Status(UserArgs),
    /// Everyone's shifts, newest first
    Report(ReportArgs),
}

#[derive(Subcommand)]
pub enum StatsCommands {
    /// A pizzaiolo's orders and preparation times for a day
    Production(DayStatsArgs),
    /// A driver's orders for a day
    Delivery(DayStatsArgs),
    /// A driver's recent deliveries
    History(HistoryArgs),
    /// Kitchen and driver ranking over the last days
    Ranking(RankingArgs),
    /// Order counts per status for a day
    Overview(DateArgs),
}

#[derive(ClapArgs)]
pub struct AddOrderArgs {
    /// Customer name
    #[arg(long)]
    pub customer: String,

    /// Customer phone
    #[arg(long)]
    pub phone: String,

    #[arg(long)]
    pub address: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,

    /// Line item as "2x Margherita", optionally ":size:category"; repeatable
    #[arg(long = "item", required = true)]
    pub items: Vec<LineItem>,

    /// Order total, e.g. 59.90
    #[arg(long, value_parser = parse_cents)]
    pub total: i64,

    /// Payment method, e.g. pix or card
    #[arg(long)]
    pub payment: Option<String>,
}

impl From<AddOrderArgs> for NewOrder {
    fn from(val: AddOrderArgs) -> Self {
        NewOrder {
            customer_name: val.customer,
            customer_phone: val.phone,
            delivery_address: val.address,
            notes: val.notes,
            items: val.items,
            total_cents: val.total,
            payment_method: val.payment,
        }
    }
}

#[derive(ClapArgs)]
pub struct ListOrdersArgs {
    /// Show only the statuses this role works on
    #[arg(long)]
    pub role: Option<Role>,

    /// Only these statuses; repeatable
    #[arg(long = "status")]
    pub statuses: Vec<OrderStatus>,

    /// Only orders in this category (dessert, specialty, combo, classic, ...)
    #[arg(long)]
    pub category: Option<String>,
}

impl ListOrdersArgs {
    /// Requested statuses the role's queue can hold. `--status` values
    /// outside the role's visible set are dropped.
    pub fn effective_statuses(&self) -> Vec<OrderStatus> {
        match self.role {
            Some(role) if self.statuses.is_empty() => role.visible_statuses().to_vec(),
            Some(role) => self
                .statuses
                .iter()
                .copied()
                .filter(|s| role.sees(*s))
                .collect(),
            None => self.statuses.clone(),
        }
    }

    /// True when `--role` and `--status` were both given but share no status.
    pub fn matches_nothing(&self) -> bool {
        self.role.is_some() && !self.statuses.is_empty() && self.effective_statuses().is_empty()
    }
}

impl From<&ListOrdersArgs> for OrderFilter {
    fn from(val: &ListOrdersArgs) -> Self {
        OrderFilter::default().with_statuses(val.effective_statuses())
    }
}

#[derive(ClapArgs)]
pub struct OrderIdArgs {
    /// Order ID
    pub id: u64,
}

#[derive(ClapArgs)]
pub struct MoveArgs {
    /// Order ID
    pub id: u64,

    /// Staff member acting on the order
    #[arg(long, short)]
    pub user: String,
}

#[derive(ClapArgs)]
pub struct UserArgs {
    #[arg(long, short)]
    pub user: String,
}

#[derive(ClapArgs)]
pub struct DayStatsArgs {
    #[arg(long, short)]
    pub user: String,

    /// UTC day as YYYY-MM-DD; defaults to today
    #[arg(long)]
    pub date: Option<Date>,
}

#[derive(ClapArgs)]
pub struct HistoryArgs {
    #[arg(long, short)]
    pub user: String,

    /// Number of deliveries to show
    #[arg(long, default_value_t = 50)]
    pub limit: u32,
}

#[derive(ClapArgs)]
pub struct OrderHistoryArgs {
    /// Only orders this pizzaiolo claimed
    #[arg(long, short)]
    pub user: Option<String>,

    #[arg(long, default_value_t = 100)]
    pub limit: u32,
}

#[derive(ClapArgs)]
pub struct ReportArgs {
    /// Number of shifts to show
    #[arg(long, default_value_t = 50)]
    pub limit: u32,
}

#[derive(ClapArgs)]
pub struct RankingArgs {
    /// Length of the window in days
    #[arg(long, default_value_t = 30)]
    pub days: u32,
}

#[derive(ClapArgs)]
pub struct DateArgs {
    /// UTC day as YYYY-MM-DD; defaults to today
    #[arg(long)]
    pub date: Option<Date>,
}

#[derive(ClapArgs)]
pub struct WatchArgs {
    /// Role whose queue to follow
    #[arg(long)]
    pub role: Role,

    /// Only orders in this category
    #[arg(long)]
    pub category: Option<String>,

    /// How often to check the database for writes from other terminals, in
    /// milliseconds
    #[arg(long, default_value_t = 500)]
    pub poll_ms: u64,

    /// Print the current queue once and exit
    #[arg(long)]
    pub once: bool,
}

/// Parses an amount such as `59.90`, `59,9` or `60` into cents.
fn parse_cents(s: &str) -> Result<i64, String> {
    let s = s.trim().replace(',', ".");
    if s.starts_with('-') {
        return Err("Amount cannot be negative".to_string());
    }
    let (whole, frac) = s.split_once('.').unwrap_or((s.as_str(), ""));
    if whole.is_empty() || frac.len() > 2 || !frac.chars().all(|c| c.is_ascii_digit()) {
        return Err(format!("Invalid amount '{s}', expected e.g. 59.90"));
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) {
        return Err(format!("Invalid amount '{s}', expected e.g. 59.90"));
    }
    let whole: i64 = whole
        .parse()
        .map_err(|e| format!("Invalid amount '{s}': {e}"))?;
    let frac: i64 = if frac.is_empty() {
        0
    } else {
        format!("{frac:0<2}")
            .parse()
            .map_err(|e| format!("Invalid amount '{s}': {e}"))?
    };
    whole
        .checked_mul(100)
        .and_then(|c| c.checked_add(frac))
        .ok_or_else(|| format!("Amount '{s}' is too large"))
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_cents() {
        assert_eq!(parse_cents("59.90"), Ok(5990));
        assert_eq!(parse_cents("59,9"), Ok(5990));
        assert_eq!(parse_cents("60"), Ok(6000));
        assert_eq!(parse_cents("0.05"), Ok(5));
        assert!(parse_cents("1.234").is_err());
        assert!(parse_cents("abc").is_err());
        assert!(parse_cents("-3").is_err());
        assert!(parse_cents("-0.50").is_err());
        assert!(parse_cents("-0,99").is_err());
        assert!(parse_cents(" -0").is_err());
        assert!(parse_cents("+5").is_err());
        assert!(parse_cents(".50").is_err());
    }

    #[test]
    fn test_add_order_parses_items() {
        let args = Args::try_parse_from([
            "brasa",
            "order",
            "add",
            "--customer",
            "Bruna",
            "--phone",
            "11 98888-7777",
            "--item",
            "2x Brigadeiro",
            "--item",
            "Margherita:large",
            "--total",
            "59.90",
        ])
        .expect("valid arguments");

        let Some(Commands::Order {
            command: OrderCommands::Add(add),
        }) = args.command
        else {
            panic!("expected order add");
        };
        let order = NewOrder::from(add);
        assert_eq!(order.total_cents, 5990);
        assert_eq!(order.items[0], LineItem::new(2, "Brigadeiro"));
        assert_eq!(order.items[1], LineItem::new(1, "Margherita").with_size("large"));
    }

    #[test]
    fn test_list_filter_from_role() {
        let args = ListOrdersArgs {
            role: Some(Role::Kitchen),
            statuses: vec![],
            category: None,
        };
        let filter = OrderFilter::from(&args);
        assert_eq!(filter.statuses, vec![OrderStatus::Pending, OrderStatus::Preparing]);
    }

    #[test]
    fn test_list_status_limited_to_role_queue() {
        let args = ListOrdersArgs {
            role: Some(Role::Kitchen),
            statuses: vec![OrderStatus::Preparing, OrderStatus::Ready],
            category: None,
        };
        assert_eq!(
            OrderFilter::from(&args).statuses,
            vec![OrderStatus::Preparing]
        );
        assert!(!args.matches_nothing());

        let args = ListOrdersArgs {
            role: Some(Role::Kitchen),
            statuses: vec![OrderStatus::Ready],
            category: None,
        };
        assert!(args.matches_nothing());
    }

    #[test]
    fn test_list_status_without_role() {
        let args = ListOrdersArgs {
            role: None,
            statuses: vec![OrderStatus::Ready],
            category: None,
        };
        assert_eq!(OrderFilter::from(&args).statuses, vec![OrderStatus::Ready]);
        assert!(!args.matches_nothing());
    }
}
