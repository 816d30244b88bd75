use clap::{Args, ValueEnum};
use serde_json::Value;

use calc_invest_core::instruments::{self, InstrumentKind, RateBook};
use calc_invest_core::parse::{parse_lenient, parse_term_months};
use calc_invest_core::simulation::{self, SeriesBasis, SimulationInput};
use calc_invest_core::CalcInvestResult;

use crate::input;

/// Instrument selector for `--instrument`
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum InstrumentArg {
    LciLca,
    Cdb,
    TesouroSelic,
    TesouroIpca,
    TesouroPrefixado,
    FundoDi,
    Poupanca,
}

impl From<InstrumentArg> for InstrumentKind {
    fn from(arg: InstrumentArg) -> Self {
        match arg {
            InstrumentArg::LciLca => InstrumentKind::LciLca,
            InstrumentArg::Cdb => InstrumentKind::Cdb,
            InstrumentArg::TesouroSelic => InstrumentKind::TesouroSelic,
            InstrumentArg::TesouroIpca => InstrumentKind::TesouroIpca,
            InstrumentArg::TesouroPrefixado => InstrumentKind::TesouroPrefixado,
            InstrumentArg::FundoDi => InstrumentKind::FundoDi,
            InstrumentArg::Poupanca => InstrumentKind::Poupanca,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum BasisArg {
    Net,
    Gross,
}

impl From<BasisArg> for SeriesBasis {
    fn from(arg: BasisArg) -> Self {
        match arg {
            BasisArg::Net => SeriesBasis::Net,
            BasisArg::Gross => SeriesBasis::Gross,
        }
    }
}

/// Rate-book overrides. Values are free text: anything unparsable reads as 0.
#[derive(Args, Debug, Default)]
pub struct RateBookArgs {
    /// Selic, % a.a. (default 14.90)
    #[arg(long, allow_hyphen_values = true)]
    pub selic: Option<String>,

    /// CDI, % a.a. (default 14.90)
    #[arg(long, allow_hyphen_values = true)]
    pub cdi: Option<String>,

    /// IPCA inflation, % a.a. (default 4.10)
    #[arg(long, allow_hyphen_values = true)]
    pub ipca: Option<String>,

    /// TR, % a.m. (default 0.1723)
    #[arg(long, allow_hyphen_values = true)]
    pub tr: Option<String>,

    /// Tesouro Prefixado nominal rate, % a.a. (default 14.00)
    #[arg(long, allow_hyphen_values = true)]
    pub prefixed_rate: Option<String>,

    /// Tesouro Direto custody fee, % a.a. (default 0.20)
    #[arg(long, allow_hyphen_values = true)]
    pub custody_fee: Option<String>,

    /// Tesouro IPCA+ real rate, % a.a. (default 6.50)
    #[arg(long, allow_hyphen_values = true)]
    pub ipca_real_rate: Option<String>,

    /// Fundo DI administration fee, % a.a. (default 0.25)
    #[arg(long, allow_hyphen_values = true)]
    pub admin_fee: Option<String>,

    /// CDB yield, % of CDI (default 100)
    #[arg(long, allow_hyphen_values = true)]
    pub cdb_pct_cdi: Option<String>,

    /// Fundo DI yield, % of CDI (default 98.17)
    #[arg(long, allow_hyphen_values = true)]
    pub fund_pct_cdi: Option<String>,

    /// LCI/LCA yield, % of CDI (default 85)
    #[arg(long, allow_hyphen_values = true)]
    pub lci_lca_pct_cdi: Option<String>,

    /// Poupança yield, % a.m. (default 0.6732)
    #[arg(long, allow_hyphen_values = true)]
    pub savings_rate: Option<String>,
}

impl RateBookArgs {
    fn apply(&self, book: &mut RateBook) -> CalcInvestResult<()> {
        let fields = [
            (&self.selic, &mut book.selic_rate),
            (&self.cdi, &mut book.cdi_rate),
            (&self.ipca, &mut book.ipca_rate),
            (&self.tr, &mut book.tr_monthly_rate),
            (&self.prefixed_rate, &mut book.prefixed_bond_rate),
            (&self.custody_fee, &mut book.bond_custody_fee),
            (&self.ipca_real_rate, &mut book.ipca_bond_real_rate),
            (&self.admin_fee, &mut book.di_fund_admin_fee),
            (&self.cdb_pct_cdi, &mut book.cdb_cdi_percent),
            (&self.fund_pct_cdi, &mut book.di_fund_cdi_percent),
            (&self.lci_lca_pct_cdi, &mut book.lci_lca_cdi_percent),
            (&self.savings_rate, &mut book.savings_monthly_rate),
        ];
        for (text, target) in fields {
            if let Some(text) = text {
                *target = parse_lenient(text)?;
            }
        }
        Ok(())
    }
}

/// Scenario parameters shared by every simulation command
#[derive(Args, Debug)]
pub struct ScenarioArgs {
    /// Path to a JSON or YAML scenario file; individual flags override its fields
    #[arg(long)]
    pub input: Option<String>,

    /// Initial investment, R$ (default 1000)
    #[arg(long, allow_hyphen_values = true)]
    pub initial: Option<String>,

    /// Monthly contribution, R$ (default 50)
    #[arg(long, allow_hyphen_values = true)]
    pub monthly: Option<String>,

    /// Term in months (default 9); fractions are floored, negatives clamp to 0
    #[arg(long, allow_hyphen_values = true)]
    pub term: Option<String>,

    /// Instrument to include; repeat to build a lineup (default: all but Tesouro Prefixado)
    #[arg(long = "instrument", value_enum)]
    pub instruments: Vec<InstrumentArg>,

    #[command(flatten)]
    pub rates: RateBookArgs,
}

impl ScenarioArgs {
    /// Build the scenario: a file, else piped stdin, else the defaults, with
    /// any flags given on the command line layered on top.
    /// Returns any notes about free-text values that had to be adjusted.
    fn resolve(&self) -> Result<(SimulationInput, Vec<String>), Box<dyn std::error::Error>> {
        let base = if let Some(ref path) = self.input {
            input::file::read_scenario(path)?
        } else if let Some(data) = input::stdin::read_stdin()? {
            serde_json::from_value(data)?
        } else {
            SimulationInput::default()
        };
        Ok(self.apply_to(base)?)
    }

    fn apply_to(
        &self,
        mut scenario: SimulationInput,
    ) -> CalcInvestResult<(SimulationInput, Vec<String>)> {
        let mut notes = Vec::new();
        if let Some(ref text) = self.initial {
            scenario.initial_investment = parse_lenient(text)?;
        }
        if let Some(ref text) = self.monthly {
            scenario.monthly_contribution = parse_lenient(text)?;
        }
        if let Some(ref text) = self.term {
            let term = parse_term_months(text)?;
            scenario.term_months = term.months;
            notes.extend(term.adjustment);
        }
        if !self.instruments.is_empty() {
            scenario.instruments = Some(self.instruments.iter().map(|i| (*i).into()).collect());
        }
        self.rates.apply(&mut scenario.rate_book)?;

        Ok((scenario, notes))
    }
}

/// Arguments for the instrument comparison
#[derive(Args)]
pub struct CompareArgs {
    #[command(flatten)]
    pub scenario: ScenarioArgs,
}

/// Arguments for the month-by-month series
#[derive(Args)]
pub struct SeriesArgs {
    #[command(flatten)]
    pub scenario: ScenarioArgs,

    /// Value plotted per month
    #[arg(long, value_enum, default_value = "net")]
    pub basis: BasisArg,
}

/// Arguments for the derived rate panel
#[derive(Args)]
pub struct RatesArgs {
    #[command(flatten)]
    pub scenario: ScenarioArgs,
}

pub fn run_compare(args: CompareArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let (scenario, notes) = args.scenario.resolve()?;
    let mut result = simulation::compare_instruments(&scenario)?;
    result.warnings.extend(notes);
    Ok(serde_json::to_value(result)?)
}

pub fn run_series(args: SeriesArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let (scenario, notes) = args.scenario.resolve()?;
    let mut result = simulation::build_series(&scenario, args.basis.into())?;
    result.warnings.extend(notes);
    Ok(serde_json::to_value(result)?)
}

pub fn run_rates(args: RatesArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let (scenario, _) = args.scenario.resolve()?;
    let result = instruments::quote_instruments(&scenario.rate_book, scenario.lineup())?;
    Ok(serde_json::to_value(result)?)
}
