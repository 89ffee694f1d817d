//! Matchbet CLI - Command-line interface for matched betting calculations

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use colored::{ColoredString, Colorize};
use dialoguer::{theme::ColorfulTheme, Input, Select};
use std::path::{Path, PathBuf};

use matchbet::config::{ServerConfig, DEFAULT_COMMISSION_PERCENT};
use matchbet::core::matched::{resolve, risk_sweep, MatchedBetInput, MatchedBetResult, Verdict};
use matchbet::core::{calculate_cashback, CalcError};
use matchbet::form::{CashbackForm, MatchedBetForm};
use matchbet::ledger::{
    active_bonus_value, daily_totals, expire_overdue, expiring_soon, goal_progress,
    monthly_totals, pending, summarize, total_pending_value, KindFilter, LedgerFile,
    LedgerFilter, ProfitType, EXPIRY_ALERT_DAYS,
};
use matchbet::models::{
    CashbackResponse, MatchedBetResponse, SweepResponse, DEFAULT_SWEEP_STEP,
};

#[derive(Parser)]
#[command(name = "matchbet")]
#[command(author, version, about = "Matched betting calculator CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Run in interactive mode
    #[arg(short, long)]
    interactive: bool,

    /// Print machine-readable JSON instead of tables
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Args)]
struct BetArgs {
    /// Back (bookmaker) odd, decimal
    #[arg(long)]
    back_odd: f64,

    /// Back stake
    #[arg(long)]
    stake: f64,

    /// Lay (exchange) odd, decimal
    #[arg(long)]
    lay_odd: f64,

    /// Exchange commission in percent
    #[arg(long, default_value_t = DEFAULT_COMMISSION_PERCENT)]
    commission: f64,

    /// The back stake is a freebet (not returned on a win)
    #[arg(long)]
    freebet: bool,

    /// Risk allocation (0 = back side, 50 = neutral, 100 = lay side)
    #[arg(long, default_value = "50")]
    risk: u8,
}

impl BetArgs {
    fn to_input(&self) -> MatchedBetInput {
        MatchedBetInput::new(self.back_odd, self.stake, self.lay_odd, self.commission)
            .freebet(self.freebet)
            .with_risk_allocation(self.risk)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate lay stake and outcomes for a matched bet
    Matched {
        #[command(flatten)]
        bet: BetArgs,

        /// Evaluate this lay stake instead of the optimal one
        #[arg(long)]
        lay_stake: Option<f64>,
    },

    /// Show the matched bet across the whole risk slider
    Sweep {
        #[command(flatten)]
        bet: BetArgs,

        /// Slider step
        #[arg(long, default_value_t = DEFAULT_SWEEP_STEP)]
        step: u8,
    },

    /// Calculate cashback on a settled amount
    Cashback {
        /// Settled amount
        #[arg(short, long)]
        amount: f64,

        /// Cashback percentage
        #[arg(short, long)]
        percentage: f64,
    },

    /// Summarize a ledger JSON file
    Ledger {
        /// Path to the ledger JSON file
        #[arg(short, long)]
        file: PathBuf,

        /// Reference day for goals and expiry alerts (default: today)
        #[arg(long)]
        today: Option<NaiveDate>,

        /// Only entries on or after this date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Only entries on or before this date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,

        /// Only entries from this betting house
        #[arg(long)]
        house: Option<String>,

        /// Entry kind: all, profit, or loss
        #[arg(short, long, default_value = "all")]
        kind: String,

        /// Group totals by month instead of by day
        #[arg(long)]
        monthly: bool,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if cli.interactive {
        println!("{}", "Matchbet CLI".cyan().bold());
        println!();
        run_interactive()?;
    } else if let Some(command) = cli.command {
        match command {
            Commands::Matched { bet, lay_stake } => {
                let mut input = bet.to_input();
                if let Some(lay_stake) = lay_stake {
                    input = input.with_lay_stake(lay_stake);
                }
                run_matched(&input, cli.json)?;
            }
            Commands::Sweep { bet, step } => {
                run_sweep(&bet.to_input(), step, cli.json)?;
            }
            Commands::Cashback { amount, percentage } => {
                run_cashback(amount, percentage, cli.json)?;
            }
            Commands::Ledger {
                file,
                today,
                from,
                to,
                house,
                kind,
                monthly,
            } => {
                let filter = LedgerFilter {
                    from,
                    to,
                    kind: parse_kind(&kind)?,
                    betting_house: house,
                };
                let today = today.unwrap_or_else(|| chrono::Local::now().date_naive());
                run_ledger(&file, &filter, today, monthly, cli.json)?;
            }
        }
    } else {
        println!("Use --help for usage information or --interactive for interactive mode.");
    }

    Ok(())
}

fn parse_kind(kind: &str) -> Result<KindFilter> {
    match kind {
        "all" => Ok(KindFilter::All),
        "profit" => Ok(KindFilter::Profit),
        "loss" => Ok(KindFilter::Loss),
        other => bail!("Unknown entry kind: {} (use all, profit, or loss)", other),
    }
}

/// Green for gains, red for losses
fn money(amount: f64) -> ColoredString {
    let text = format!("{:.2}", amount);
    if amount >= 0.0 {
        text.green()
    } else {
        text.red()
    }
}

fn verdict_label(verdict: Verdict) -> ColoredString {
    match verdict {
        Verdict::Surebet => "Guaranteed surebet".green().bold(),
        Verdict::ValueExtraction => "Value extraction possible".yellow().bold(),
        Verdict::Loss => "Not a surebet".red().bold(),
    }
}

fn print_unavailable(err: &CalcError) {
    println!("{} {}", "Result unavailable:".red().bold(), err);
}

fn print_result(input: &MatchedBetInput, result: &MatchedBetResult) {
    println!(
        "{}: back {:.2} @ {:.2}{} / lay @ {:.2}, commission {:.2}%, risk {}",
        "Matched bet".green(),
        input.back_stake,
        input.back_odd,
        if input.is_freebet { " (freebet)" } else { "" },
        input.lay_odd,
        input.commission_percent,
        input.risk_allocation
    );
    println!("{}", "-".repeat(50));
    println!("{:<22} {:>12.2}", "Lay stake", result.lay_stake);
    println!("{:<22} {:>12.2}", "Required balance", result.required_balance);
    println!("{:<22} {:>12}", "Profit if back wins", money(result.profit_if_back_wins));
    println!("{:<22} {:>12}", "Profit if lay wins", money(result.profit_if_lay_wins));
    println!(
        "{:<22} {:>11.2}%",
        "Profit / invested", result.profit_percentage
    );
    if let Some(extraction) = result.freebet_extraction_percentage {
        println!("{:<22} {:>11.2}%", "Freebet extraction", extraction);
    }
    println!();
    println!("{} {}", "→".green(), verdict_label(result.verdict));
}

fn run_matched(input: &MatchedBetInput, json: bool) -> Result<()> {
    let result = match resolve(input) {
        Ok(result) => result,
        Err(e) => {
            print_unavailable(&e);
            return Ok(());
        }
    };

    if json {
        let response = MatchedBetResponse {
            input: *input,
            result,
        };
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print_result(input, &result);
    }

    Ok(())
}

fn run_sweep(input: &MatchedBetInput, step: u8, json: bool) -> Result<()> {
    let points = match risk_sweep(input, step) {
        Ok(points) => points,
        Err(e) => {
            print_unavailable(&e);
            return Ok(());
        }
    };

    if json {
        let response = SweepResponse {
            input: *input,
            points,
        };
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    println!("{}", "Risk allocation sweep:".yellow().bold());
    println!(
        "{:>5} {:>10} {:>10} {:>12} {:>12} {:>9}",
        "Risk", "Lay", "Balance", "Back wins", "Lay wins", "Profit%"
    );
    println!("{}", "-".repeat(63));

    for point in &points {
        let result = &point.result;
        let marker = if result.is_surebet { "*".green() } else { " ".normal() };
        println!(
            "{:>5} {:>10.2} {:>10.2} {:>12} {:>12} {:>8.2}%{}",
            point.risk_allocation,
            result.lay_stake,
            result.required_balance,
            money(result.profit_if_back_wins),
            money(result.profit_if_lay_wins),
            result.profit_percentage,
            marker
        );
    }

    let surebets = points.iter().filter(|p| p.result.is_surebet).count();
    if surebets > 0 {
        println!();
        println!("{} Surebet positions (*): {}", "→".green(), surebets);
    }

    Ok(())
}

fn run_cashback(amount: f64, percentage: f64, json: bool) -> Result<()> {
    let cashback = match calculate_cashback(amount, percentage) {
        Ok(cashback) => cashback,
        Err(e) => {
            print_unavailable(&e);
            return Ok(());
        }
    };

    if json {
        let response = CashbackResponse {
            amount,
            percentage,
            cashback,
        };
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        println!(
            "{}: {:.2} at {:.2}% → {}",
            "Cashback".green(),
            amount,
            percentage,
            money(cashback)
        );
    }

    Ok(())
}

fn run_ledger(
    path: &Path,
    filter: &LedgerFilter,
    today: NaiveDate,
    monthly: bool,
    json: bool,
) -> Result<()> {
    let mut ledger = LedgerFile::load(path)
        .with_context(|| format!("Failed to load ledger from {:?}", path))?;
    expire_overdue(&mut ledger.freebets, today);

    let entries: Vec<_> = filter.apply(&ledger.entries);
    let summary = summarize(entries.iter().copied());
    let totals = if monthly {
        monthly_totals(entries.iter().copied())
    } else {
        daily_totals(entries.iter().copied())
    };
    let progress = ledger
        .goals
        .as_ref()
        .map(|goals| goal_progress(&ledger.entries, goals, today));

    if json {
        let report = serde_json::json!({
            "summary": summary,
            "totals": totals,
            "goal_progress": progress,
            "pending_freebet_value": total_pending_value(&ledger.freebets),
            "expiring_freebets": expiring_soon(&ledger.freebets, today, EXPIRY_ALERT_DAYS),
            "active_bonus_value": active_bonus_value(&ledger.bonuses),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", "Ledger summary:".yellow().bold());
    println!("{}", "-".repeat(40));
    println!(
        "{:<18} {:>6} ({} profit / {} loss)",
        "Entries", summary.entries, summary.profit_entries, summary.loss_entries
    );
    println!("{:<18} {:>12}", "Gross profit", money(summary.gross_profit));
    println!("{:<18} {:>12}", "Gross loss", money(-summary.gross_loss));
    println!("{:<18} {:>12}", "Net profit", money(summary.net_profit));
    println!();

    if !summary.profit_by_type.is_empty() {
        println!("{}", "Profit by type:".yellow().bold());
        for profit_type in ProfitType::ALL {
            if let Some(value) = summary.profit_by_type.get(&profit_type) {
                println!("{:<20} {:>12}", profit_type.label(), money(*value));
            }
        }
        println!();
    }

    if !totals.is_empty() {
        let heading = if monthly { "Monthly totals:" } else { "Daily totals:" };
        println!("{}", heading.yellow().bold());
        println!("{:>10} {:>8} {:>12}", "Period", "Entries", "Net");
        println!("{}", "-".repeat(32));
        for total in &totals {
            let period = if monthly {
                total.period.format("%Y-%m").to_string()
            } else {
                total.period.to_string()
            };
            println!(
                "{:>10} {:>8} {:>12}",
                period,
                total.entries,
                money(total.net_profit)
            );
        }
        println!();
    }

    if let Some(progress) = progress {
        println!("{} ({})", "Goals:".yellow().bold(), today);
        println!(
            "{:<18} {:>10} {:>7.1}%",
            "Today's profit",
            money(progress.today_profit),
            progress.daily_profit_ratio * 100.0
        );
        println!(
            "{:<18} {:>10} {:>7.1}%",
            "Today's entries",
            progress.today_entries,
            progress.daily_entries_ratio * 100.0
        );
        println!(
            "{:<18} {:>10} {:>7.1}%",
            "Month's profit",
            money(progress.month_profit),
            progress.monthly_profit_ratio * 100.0
        );
        if progress.daily_goal_met() {
            println!("{} Daily goal reached", "→".green());
        }
        if progress.monthly_goal_met() {
            println!("{} Monthly goal reached", "→".green());
        }
        println!();
    }

    let pending_freebets = pending(&ledger.freebets);
    if !pending_freebets.is_empty() {
        println!(
            "{}: {} pending, total {}",
            "Freebets".yellow().bold(),
            pending_freebets.len(),
            money(total_pending_value(&ledger.freebets))
        );
        for freebet in expiring_soon(&ledger.freebets, today, EXPIRY_ALERT_DAYS) {
            let days = freebet.days_until_expiry(today).unwrap_or_default();
            println!(
                "  {} {} {:.2} expires in {} day(s)",
                "!".red().bold(),
                freebet.betting_house,
                freebet.value,
                days
            );
        }
    }

    let bonus_value = active_bonus_value(&ledger.bonuses);
    if bonus_value > 0.0 {
        println!("{}: {}", "Active bonuses".yellow().bold(), money(bonus_value));
    }

    Ok(())
}

fn prompt_text(theme: &ColorfulTheme, prompt: &str, initial: &str) -> Result<String> {
    let text = Input::<String>::with_theme(theme)
        .with_prompt(prompt)
        .with_initial_text(initial)
        .allow_empty(true)
        .interact_text()?;
    Ok(text)
}

fn run_interactive() -> Result<()> {
    println!("{}", "Interactive mode".green().bold());
    println!("Blank or non-numeric fields leave the result unavailable.\n");

    let theme = ColorfulTheme::default();
    let defaults = ServerConfig::from_env().defaults;

    loop {
        let options = vec!["Matched bet", "Cashback", "Quit"];

        let selection = Select::with_theme(&theme)
            .with_prompt("What would you like to calculate?")
            .items(&options)
            .default(0)
            .interact()?;

        match selection {
            0 => {
                let mut form = MatchedBetForm::with_defaults(&defaults);
                form.back_odd = prompt_text(&theme, "Back odd", "")?;
                form.back_stake = prompt_text(&theme, "Back stake", "")?;
                form.is_freebet = Select::with_theme(&theme)
                    .with_prompt("Freebet?")
                    .items(&["No", "Yes"])
                    .default(0)
                    .interact()?
                    == 1;
                form.lay_odd = prompt_text(&theme, "Lay odd", "")?;
                form.commission = prompt_text(&theme, "Commission (%)", &form.commission)?;
                form.risk_allocation = Input::with_theme(&theme)
                    .with_prompt("Risk allocation (0-100)")
                    .default(defaults.risk_allocation)
                    .interact_text()?;

                if let Some(suggested) = form.suggest_lay_stake() {
                    form.lay_stake =
                        prompt_text(&theme, "Lay stake", &format!("{:.2}", suggested))?;
                }

                println!();
                match form
                    .parse()
                    .and_then(|input| resolve(&input).map(|result| (input, result)))
                {
                    Ok((input, result)) => print_result(&input, &result),
                    Err(e) => print_unavailable(&e),
                }
                println!();
            }
            1 => {
                let form = CashbackForm::new(
                    prompt_text(&theme, "Amount", "")?,
                    prompt_text(&theme, "Cashback (%)", "")?,
                );

                println!();
                match form.evaluate() {
                    Some(cashback) => println!("{}: {}", "Cashback".green(), money(cashback)),
                    None => println!("{}", "Result unavailable".red().bold()),
                }
                println!();
            }
            2 => {
                println!("Goodbye!");
                break;
            }
            _ => {}
        }
    }

    Ok(())
}
