//! Command handlers.
//!
//! Each handler calls one [`OrderDesk`] operation and renders the result as
//! markdown. Refused moves (wrong role, stale snapshot, missing order) print
//! a failure line before the error is returned.

use anyhow::{Context, Result};
use brasa_core::{
    display::{Elapsed, OperationStatus, Orders, Shifts},
    engine::category,
    models::{time, Actor, NewOrder, OrderFilter, OrderStatus, Role},
    BrasaError, CreateResult, OrderDesk,
};
use jiff::civil::Date;
use log::debug;

use crate::{
    args::{
        AddOrderArgs, DateArgs, DayStatsArgs, DriverCommands, HistoryArgs, KitchenCommands,
        ListOrdersArgs, MoveArgs, OrderCommands, OrderHistoryArgs, OrderIdArgs, RankingArgs,
        ReportArgs, ShiftCommands, StatsCommands, UserArgs, WatchArgs,
    },
    renderer::TerminalRenderer,
};

/// Recent shifts shown by `shift status`.
const SHIFT_HISTORY_LIMIT: u32 = 10;

pub struct Cli {
    desk: OrderDesk,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(desk: OrderDesk, renderer: TerminalRenderer) -> Self {
        Self { desk, renderer }
    }

    pub async fn handle_order_command(&self, command: OrderCommands) -> Result<()> {
        match command {
            OrderCommands::Add(args) => self.add_order(args).await,
            OrderCommands::List(args) => self.list_orders(&args).await,
            OrderCommands::Show(args) => self.show_order(args).await,
            OrderCommands::History(args) => self.order_history(args).await,
        }
    }

    pub async fn handle_kitchen_command(&self, command: KitchenCommands) -> Result<()> {
        match command {
            KitchenCommands::Start(args) => {
                self.move_order(args, Role::Kitchen, OrderStatus::Preparing)
                    .await
            }
            KitchenCommands::Ready(args) => {
                self.move_order(args, Role::Kitchen, OrderStatus::Ready)
                    .await
            }
        }
    }

    pub async fn handle_driver_command(&self, command: DriverCommands) -> Result<()> {
        match command {
            DriverCommands::Start(args) => {
                self.move_order(args, Role::Driver, OrderStatus::OutForDelivery)
                    .await
            }
            DriverCommands::Deliver(args) => {
                self.move_order(args, Role::Driver, OrderStatus::Delivered)
                    .await
            }
        }
    }

    pub async fn handle_shift_command(&self, command: ShiftCommands) -> Result<()> {
        match command {
            ShiftCommands::In(args) => self.clock_in(args).await,
            ShiftCommands::Out(args) => self.clock_out(args).await,
            ShiftCommands::Status(args) => self.shift_status(args).await,
            ShiftCommands::Report(args) => self.attendance_report(args).await,
        }
    }

    pub async fn handle_stats_command(&self, command: StatsCommands) -> Result<()> {
        match command {
            StatsCommands::Production(args) => self.production_stats(args).await,
            StatsCommands::Delivery(args) => self.delivery_stats(args).await,
            StatsCommands::History(args) => self.delivery_history(args).await,
            StatsCommands::Ranking(args) => self.performance_ranking(args).await,
            StatsCommands::Overview(args) => self.orders_overview(args).await,
        }
    }

    async fn add_order(&self, args: AddOrderArgs) -> Result<()> {
        let order = self
            .desk
            .create_order(NewOrder::from(args))
            .await
            .context("Failed to create order")?;
        self.renderer
            .render(&CreateResult::new(order).to_string())
    }

    pub async fn list_orders(&self, args: &ListOrdersArgs) -> Result<()> {
        let orders = match (args.role, args.statuses.is_empty()) {
            _ if args.matches_nothing() => Vec::new(),
            // Plain role queue
            (Some(role), true) => self
                .desk
                .queue(role, args.category.as_deref())
                .await
                .context("Failed to load queue")?,
            _ => {
                let orders = self
                    .desk
                    .list_orders(&OrderFilter::from(args))
                    .await
                    .context("Failed to list orders")?;
                match args.category.as_deref() {
                    Some(wanted) => orders
                        .into_iter()
                        .filter(|o| {
                            category::matches(
                                self.desk.category_policy().as_ref(),
                                &o.items,
                                wanted,
                            )
                        })
                        .collect(),
                    None => orders,
                }
            }
        };

        let title = match args.role {
            Some(role) => format!("# {} queue", capitalize(role.as_str())),
            None => "# Orders".to_string(),
        };
        self.renderer
            .render(&format!("{title}\n\n{}", Orders(orders)))
    }

    async fn show_order(&self, args: OrderIdArgs) -> Result<()> {
        match self
            .desk
            .get_order(args.id)
            .await
            .context("Failed to load order")?
        {
            Some(order) => self.renderer.render(&order.to_string()),
            None => self.fail(BrasaError::OrderNotFound { id: args.id }),
        }
    }

    async fn order_history(&self, args: OrderHistoryArgs) -> Result<()> {
        let orders = self
            .desk
            .order_history(args.user.as_deref(), Some(args.limit))
            .await
            .context("Failed to load order history")?;
        self.renderer
            .render(&format!("# Order history\n\n{}", Orders(orders)))
    }

    async fn move_order(&self, args: MoveArgs, role: Role, to: OrderStatus) -> Result<()> {
        let actor = Actor::new(args.user, role);
        match self.desk.transition_by_id(args.id, to, &actor).await {
            Ok(outcome) => self.renderer.render(&outcome.to_string()),
            Err(e) => self.fail(e),
        }
    }

    async fn clock_in(&self, args: UserArgs) -> Result<()> {
        let claim = self
            .desk
            .clock_in(&args.user)
            .await
            .context("Failed to clock in")?;
        self.renderer.render(&claim.to_string())
    }

    async fn clock_out(&self, args: UserArgs) -> Result<()> {
        match self.desk.clock_out(&args.user).await {
            Ok(shift) => self.renderer.render(
                &OperationStatus::success(format!("Clocked out {}", shift.user_id)).to_string(),
            ),
            Err(e) => self.fail(e),
        }
    }

    async fn shift_status(&self, args: UserArgs) -> Result<()> {
        let open = self
            .desk
            .open_shift(&args.user)
            .await
            .context("Failed to load open shift")?;
        let recent = self
            .desk
            .recent_shifts(&args.user, SHIFT_HISTORY_LIMIT)
            .await
            .context("Failed to load shifts")?;

        let headline = if open.is_some() {
            format!("{} is clocked in", args.user)
        } else {
            format!("{} is not clocked in", args.user)
        };
        self.renderer
            .render(&format!("# {headline}\n\n{}", Shifts(recent)))
    }

    async fn attendance_report(&self, args: ReportArgs) -> Result<()> {
        let shifts = self
            .desk
            .attendance_report(Some(args.limit))
            .await
            .context("Failed to load shifts")?;
        self.renderer
            .render(&format!("# Attendance\n\n{}", Shifts(shifts)))
    }

    async fn production_stats(&self, args: DayStatsArgs) -> Result<()> {
        let date = day_or_today(args.date);
        let stats = self
            .desk
            .production_stats(&args.user, date)
            .await
            .context("Failed to compute production stats")?;
        let kitchen = self
            .desk
            .average_prep_seconds(date)
            .await
            .context("Failed to compute kitchen average")?;

        let mut output = format!("# {date}\n\n{stats}");
        if let Some(avg) = kitchen {
            output.push_str(&format!(
                "- **Kitchen average**: {}\n",
                Elapsed(avg.round() as i64)
            ));
        }
        self.renderer.render(&output)
    }

    async fn delivery_stats(&self, args: DayStatsArgs) -> Result<()> {
        let date = day_or_today(args.date);
        let stats = self
            .desk
            .delivery_stats(&args.user, date)
            .await
            .context("Failed to compute delivery stats")?;
        self.renderer.render(&format!("# {date}\n\n{stats}"))
    }

    async fn delivery_history(&self, args: HistoryArgs) -> Result<()> {
        let history = self
            .desk
            .delivery_history(&args.user, Some(args.limit))
            .await
            .context("Failed to load delivery history")?;
        self.renderer.render(&history.to_string())
    }

    async fn performance_ranking(&self, args: RankingArgs) -> Result<()> {
        match self.desk.performance_ranking(args.days).await {
            Ok(ranking) => self.renderer.render(&ranking.to_string()),
            Err(e) => self.fail(e),
        }
    }

    async fn orders_overview(&self, args: DateArgs) -> Result<()> {
        let overview = self
            .desk
            .orders_overview(day_or_today(args.date))
            .await
            .context("Failed to count orders")?;
        self.renderer.render(&overview.to_string())
    }

    /// Follows a role's queue, re-rendering on every change.
    pub async fn watch(&self, args: WatchArgs) -> Result<()> {
        let title = format!("# {} queue", capitalize(args.role.as_str()));
        let mut handle = self.desk.projector(args.role, args.category).spawn();
        let mut snapshots = handle.snapshots();

        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        loop {
            tokio::select! {
                _ = &mut ctrl_c => {
                    debug!("Interrupted, stopping watch");
                    break;
                }
                changed = snapshots.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let orders = snapshots.borrow_and_update().clone();
                    self.renderer.render(&format!("{title}\n\n{}", Orders(orders)))?;
                    if args.once {
                        break;
                    }
                }
                toast = handle.toasts.recv() => match toast {
                    Some(toast) => self
                        .renderer
                        .render(&OperationStatus::failure(toast.message).to_string())?,
                    None => break,
                },
            }
        }

        handle.shutdown().await;
        Ok(())
    }

    /// Prints the failure line and hands the error back to `main`.
    fn fail(&self, error: BrasaError) -> Result<()> {
        self.renderer
            .render(&OperationStatus::from(&error).to_string())?;
        Err(error.into())
    }
}

fn day_or_today(date: Option<Date>) -> Date {
    date.unwrap_or_else(|| time::utc_date(time::now()))
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
