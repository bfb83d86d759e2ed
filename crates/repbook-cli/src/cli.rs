use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use repbook_core::VERSION;

/// Repbook - a local-first workout log: sessions set by set, cardio,
/// body measurements and progress
#[derive(Parser)]
#[command(name = "repbook")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the store file
    #[arg(short, long, global = true, env = "REPBOOK_STORE")]
    pub store: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Assume "yes" for confirmation prompts
    #[arg(short, long, global = true)]
    pub yes: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Display name shown on screens and reports
    #[arg(long)]
    pub name: Option<String>,

    /// Key prefix the profile's data is stored under
    #[arg(long)]
    pub prefix: Option<String>,

    /// Overwrite an existing config
    #[arg(long)]
    pub force: bool,
}

/// Output flag shared by read-only commands
#[derive(Args, Clone, Copy, Default)]
pub struct OutputArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct PlansArgs {
    #[command(subcommand)]
    pub command: PlansSubcommand,
}

#[derive(Subcommand)]
pub enum PlansSubcommand {
    /// List workout plans
    List(OutputArgs),

    /// Show a plan's warmup and exercises
    Show(PlanShowArgs),

    /// Append a new exercise to a plan
    AddExercise(AddExerciseArgs),

    /// Change fields of an exercise
    EditExercise(EditExerciseArgs),

    /// Remove an exercise from a plan
    RemoveExercise(PlanIndexArgs),

    /// Move an exercise one position up or down
    Move(MoveExerciseArgs),

    /// Restore a plan to its bundled default
    Reset(PlanIdArgs),
}

#[derive(Args)]
pub struct PlanIdArgs {
    /// Plan ID (e.g., fbw)
    #[arg(value_name = "PLAN")]
    pub plan: String,
}

#[derive(Args)]
pub struct PlanShowArgs {
    /// Plan ID (e.g., fbw)
    #[arg(value_name = "PLAN")]
    pub plan: String,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args)]
pub struct PlanIndexArgs {
    /// Plan ID
    #[arg(value_name = "PLAN")]
    pub plan: String,

    /// Exercise position as shown by `plans show` (1-based)
    #[arg(value_name = "POSITION")]
    pub position: usize,
}

/// Exercise fields accepted by `add-exercise` and `edit-exercise`
#[derive(Args, Default)]
pub struct ExerciseFields {
    /// Exercise name
    #[arg(long)]
    pub name: Option<String>,

    /// Localized description
    #[arg(long)]
    pub pl: Option<String>,

    /// Number of sets (at least 1)
    #[arg(long)]
    pub sets: Option<u32>,

    /// Rep range, e.g. "8-10"
    #[arg(long)]
    pub reps: Option<String>,

    /// Tempo, e.g. "2011"
    #[arg(long)]
    pub tempo: Option<String>,

    /// Reps in reserve
    #[arg(long)]
    pub rir: Option<String>,

    /// Rest between sets in seconds
    #[arg(long)]
    pub rest: Option<u32>,

    /// Video link
    #[arg(long)]
    pub link: Option<String>,

    /// Exercise type (standard, reps_only, time)
    #[arg(long = "type", value_name = "TYPE")]
    pub kind: Option<String>,
}

#[derive(Args)]
pub struct AddExerciseArgs {
    /// Plan ID
    #[arg(value_name = "PLAN")]
    pub plan: String,

    #[command(flatten)]
    pub fields: ExerciseFields,
}

#[derive(Args)]
pub struct EditExerciseArgs {
    /// Plan ID
    #[arg(value_name = "PLAN")]
    pub plan: String,

    /// Exercise position as shown by `plans show` (1-based)
    #[arg(value_name = "POSITION")]
    pub position: usize,

    #[command(flatten)]
    pub fields: ExerciseFields,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum MoveDirection {
    Up,
    Down,
}

#[derive(Args)]
pub struct MoveExerciseArgs {
    /// Plan ID
    #[arg(value_name = "PLAN")]
    pub plan: String,

    /// Exercise position as shown by `plans show` (1-based)
    #[arg(value_name = "POSITION")]
    pub position: usize,

    /// Direction to move
    #[arg(value_enum)]
    pub direction: MoveDirection,
}

#[derive(Args)]
pub struct WorkoutArgs {
    #[command(subcommand)]
    pub command: WorkoutSubcommand,
}

#[derive(Subcommand)]
pub enum WorkoutSubcommand {
    /// Start (or resume) a workout of a plan
    Start(PlanIdArgs),

    /// Record values for one set
    Log(LogSetArgs),

    /// Set the note of an exercise
    Note(NoteArgs),

    /// Fill every set's weight from the last result
    Fill(ExerciseRefArgs),

    /// Show the in-progress workout
    Status(WorkoutStatusArgs),

    /// Run the stopwatch of a timed set (Enter stops it)
    Timer(TimerArgs),

    /// Finish the workout and save it to history
    Finish(PlanIdArgs),

    /// Throw away the in-progress workout
    Discard(PlanIdArgs),
}

#[derive(Args)]
pub struct ExerciseRefArgs {
    /// Plan ID
    #[arg(value_name = "PLAN")]
    pub plan: String,

    /// Exercise ID (e.g., f_1)
    #[arg(value_name = "EXERCISE")]
    pub exercise: String,
}

#[derive(Args)]
pub struct LogSetArgs {
    /// Plan ID
    #[arg(value_name = "PLAN")]
    pub plan: String,

    /// Exercise ID (e.g., f_1)
    #[arg(value_name = "EXERCISE")]
    pub exercise: String,

    /// Set number (1-based)
    #[arg(value_name = "SET")]
    pub set: u32,

    /// Weight, e.g. "102,5" (empty clears)
    #[arg(long)]
    pub kg: Option<String>,

    /// Repetitions (empty clears)
    #[arg(long)]
    pub reps: Option<String>,

    /// Seconds for timed exercises (empty clears)
    #[arg(long)]
    pub time: Option<String>,
}

#[derive(Args)]
pub struct NoteArgs {
    /// Plan ID
    #[arg(value_name = "PLAN")]
    pub plan: String,

    /// Exercise ID (e.g., f_1)
    #[arg(value_name = "EXERCISE")]
    pub exercise: String,

    /// Note text (empty clears)
    #[arg(value_name = "TEXT")]
    pub text: String,
}

#[derive(Args)]
pub struct WorkoutStatusArgs {
    /// Plan ID
    #[arg(value_name = "PLAN")]
    pub plan: String,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args)]
pub struct TimerArgs {
    /// Plan ID
    #[arg(value_name = "PLAN")]
    pub plan: String,

    /// Exercise ID of a timed exercise
    #[arg(value_name = "EXERCISE")]
    pub exercise: String,

    /// Set number (1-based)
    #[arg(value_name = "SET")]
    pub set: u32,
}

#[derive(Args)]
pub struct HistoryArgs {
    #[command(subcommand)]
    pub command: HistorySubcommand,
}

#[derive(Subcommand)]
pub enum HistorySubcommand {
    /// List finished workouts of a plan (all plans when omitted)
    List(HistoryListArgs),

    /// Record a workout after the fact
    Add(HistoryAddArgs),

    /// Change the display date of an entry
    EditDate(HistoryEditDateArgs),

    /// Delete an entry
    Delete(PlanIndexArgs),
}

#[derive(Args)]
pub struct HistoryListArgs {
    /// Plan ID
    #[arg(value_name = "PLAN")]
    pub plan: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args)]
pub struct HistoryAddArgs {
    /// Plan ID
    #[arg(value_name = "PLAN")]
    pub plan: String,

    /// When the workout happened (YYYY-MM-DD or YYYY-MM-DDTHH:MM)
    #[arg(long, value_name = "WHEN")]
    pub at: String,

    /// Exercise result as EXERCISE=SUMMARY (repeatable)
    #[arg(short, long, value_name = "EXERCISE=SUMMARY")]
    pub result: Vec<String>,
}

#[derive(Args)]
pub struct HistoryEditDateArgs {
    /// Plan ID
    #[arg(value_name = "PLAN")]
    pub plan: String,

    /// Entry position as shown by `history list` (1-based)
    #[arg(value_name = "POSITION")]
    pub position: usize,

    /// New display date
    #[arg(value_name = "DATE")]
    pub date: String,
}

#[derive(Args)]
pub struct MeasureArgs {
    #[command(subcommand)]
    pub command: MeasureSubcommand,
}

#[derive(Subcommand)]
pub enum MeasureSubcommand {
    /// Record body measurements
    Add(MeasureAddArgs),

    /// List measurements
    List(OutputArgs),

    /// Delete a measurement by ID
    Delete(IdArgs),

    /// Show the series of one metric
    Chart(MeasureChartArgs),
}

#[derive(Args)]
pub struct MeasureAddArgs {
    /// Date (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    pub date: Option<String>,

    /// Body weight in kg
    #[arg(long)]
    pub weight: Option<String>,

    /// Waist in cm
    #[arg(long)]
    pub waist: Option<String>,

    /// Chest in cm
    #[arg(long)]
    pub chest: Option<String>,

    /// Biceps in cm
    #[arg(long)]
    pub biceps: Option<String>,

    /// Thigh in cm
    #[arg(long)]
    pub thigh: Option<String>,
}

#[derive(Args)]
pub struct MeasureChartArgs {
    /// Metric (weight, waist, chest, biceps, thigh)
    #[arg(value_name = "METRIC", default_value = "weight")]
    pub metric: String,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args)]
pub struct IdArgs {
    /// Record ID
    #[arg(value_name = "ID")]
    pub id: String,
}

#[derive(Args)]
pub struct CardioArgs {
    #[command(subcommand)]
    pub command: CardioSubcommand,
}

#[derive(Subcommand)]
pub enum CardioSubcommand {
    /// Record a cardio session
    Add(CardioAddArgs),

    /// List cardio sessions
    List(CardioListArgs),

    /// Delete a cardio session by ID
    Delete(IdArgs),
}

#[derive(Args)]
pub struct CardioAddArgs {
    /// Machine (rowerek, bieznia, schody, orbitrek)
    #[arg(long = "type", value_name = "TYPE", default_value = "rowerek")]
    pub kind: String,

    /// Duration, e.g. "30 min"
    #[arg(long)]
    pub duration: String,

    /// Date (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    pub date: Option<String>,

    /// Free-form notes
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Args)]
pub struct CardioListArgs {
    /// Group sessions by calendar week
    #[arg(long)]
    pub weekly: bool,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args)]
pub struct ProgressArgs {
    /// Plan ID
    #[arg(value_name = "PLAN")]
    pub plan: String,

    /// Only this exercise
    #[arg(long, value_name = "EXERCISE")]
    pub exercise: Option<String>,

    /// Write the report into this directory
    #[arg(long, value_name = "DIR")]
    pub save: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args)]
pub struct ToolsArgs {
    #[command(subcommand)]
    pub command: ToolsSubcommand,
}

#[derive(Subcommand)]
pub enum ToolsSubcommand {
    /// Estimate a one-rep max and its training percentages
    OneRm(OneRmArgs),

    /// Plates per side for a target barbell weight
    Plates(PlatesArgs),

    /// Count down a rest period
    Rest(RestArgs),
}

#[derive(Args)]
pub struct OneRmArgs {
    /// Weight lifted (kg)
    #[arg(value_name = "WEIGHT")]
    pub weight: String,

    /// Repetitions performed
    #[arg(value_name = "REPS")]
    pub reps: String,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args)]
pub struct PlatesArgs {
    /// Target total weight (kg)
    #[arg(value_name = "TARGET")]
    pub target: String,

    /// Bar weight (kg)
    #[arg(long, default_value_t = repbook_core::tools::DEFAULT_BAR_KG)]
    pub bar: f64,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args)]
pub struct RestArgs {
    /// Rest duration in seconds
    #[arg(value_name = "SECONDS")]
    pub seconds: u32,
}

#[derive(Args)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub command: SettingsSubcommand,
}

#[derive(Subcommand)]
pub enum SettingsSubcommand {
    /// Show alert settings
    Show(OutputArgs),

    /// Change alert settings
    Set(SettingsSetArgs),
}

#[derive(Args)]
pub struct SettingsSetArgs {
    /// Alert volume between 0 and 1
    #[arg(long)]
    pub volume: Option<f64>,

    /// Alert sound (beep1, beep2, beep3)
    #[arg(long, value_name = "SOUND")]
    pub sound: Option<String>,
}

#[derive(Args)]
pub struct LogoArgs {
    #[command(subcommand)]
    pub command: LogoSubcommand,
}

#[derive(Subcommand)]
pub enum LogoSubcommand {
    /// Show the current logo reference
    Show,

    /// Set the logo from an image file or a URL
    Set(LogoSetArgs),
}

#[derive(Args)]
pub struct LogoSetArgs {
    /// Image file path or http(s)/data URL
    #[arg(value_name = "FILE_OR_URL")]
    pub source: String,
}

#[derive(Args)]
pub struct BackupArgs {
    #[command(subcommand)]
    pub command: BackupSubcommand,
}

#[derive(Subcommand)]
pub enum BackupSubcommand {
    /// Export the active profile to a JSON file
    Export(BackupExportArgs),

    /// Import a JSON backup, overwriting the keys it contains
    Import(BackupImportArgs),
}

#[derive(Args)]
pub struct BackupExportArgs {
    /// Destination file or directory (defaults to the current directory)
    #[arg(value_name = "DEST")]
    pub dest: Option<String>,
}

#[derive(Args)]
pub struct BackupImportArgs {
    /// Backup file to import
    #[arg(value_name = "FILE")]
    pub file: String,
}

#[derive(Args)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub command: ProfileSubcommand,
}

#[derive(Subcommand)]
pub enum ProfileSubcommand {
    /// Show the active profile and store
    Show(OutputArgs),

    /// Point the config at another profile (stored data is untouched)
    Switch(ProfileSwitchArgs),
}

#[derive(Args)]
pub struct ProfileSwitchArgs {
    /// New display name
    #[arg(long)]
    pub name: Option<String>,

    /// New key prefix
    #[arg(long)]
    pub prefix: Option<String>,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the config and store for a new install
    Init(InitArgs),

    /// View and edit workout plans
    Plans(PlansArgs),

    /// Record the workout in progress
    Workout(WorkoutArgs),

    /// Finished workouts
    History(HistoryArgs),

    /// Body measurements
    Measure(MeasureArgs),

    /// Cardio sessions
    Cardio(CardioArgs),

    /// Weight progress of a plan's exercises
    Progress(ProgressArgs),

    /// Training calculators and timers
    Tools(ToolsArgs),

    /// Alert volume and sound
    Settings(SettingsArgs),

    /// Logo shown on reports
    Logo(LogoArgs),

    /// Export or import a JSON backup
    Backup(BackupArgs),

    /// Active profile (display name and storage prefix)
    Profile(ProfileArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}
