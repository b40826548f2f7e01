//! Demo dataset seeded into a fresh [`AppState`](crate::state::AppState).
//!
//! Invoice and task dates are positioned relative to a caller-supplied `now`
//! so month-to-date metrics stay meaningful (and deterministic in tests).

use chrono::{DateTime, Duration, Months, NaiveDate, TimeZone, Utc};

use crate::types::{
    ActivityEntry, ActivityKind, AssistantAction, Board, CandidateStatus, ChatMessage, ChatSender,
    Client, CustomReport, Invoice, InvoiceStatus, MonthlyFinancials, OnboardingCandidate,
    OnboardingClient, OnboardingPipeline, Plan, ReportSchedule, SlaStatus, StaffMember,
    StaffStatus, Task, TeamCapacity, WorkspaceSettings, PermissionRole,
};

/// Advisory shown on the capacity panel until a rebalance replaces it.
pub const DEFAULT_ADVISORY: &str = "\"Motion team will hit 105% capacity by Friday. Recommend \
     approving 20h overtime or shifting 3 non-urgent briefs.\"";

/// Ids below this are reserved for seed records.
pub const FIRST_ALLOCATED_ID: u64 = 1000;

/// Everything a fresh state owns.
#[derive(Debug, Clone)]
pub struct SeedData {
    pub board: Board,
    pub staff: Vec<StaffMember>,
    pub capacity: Vec<TeamCapacity>,
    pub invoices: Vec<Invoice>,
    pub financials: Vec<MonthlyFinancials>,
    pub clients: Vec<Client>,
    pub onboarding: OnboardingPipeline,
    pub reports: Vec<CustomReport>,
    pub activity: Vec<ActivityEntry>,
    pub chat: Vec<ChatMessage>,
    pub workspace: WorkspaceSettings,
    pub advisory: String,
}

pub fn demo_dataset(now: DateTime<Utc>) -> SeedData {
    SeedData {
        board: demo_board(now),
        staff: demo_staff(),
        capacity: demo_capacity(),
        invoices: demo_invoices(now),
        financials: demo_financials(),
        clients: demo_clients(),
        onboarding: demo_onboarding(),
        reports: demo_reports(),
        activity: demo_activity(),
        chat: demo_chat(),
        workspace: WorkspaceSettings {
            name: "My DaaS Agency".to_string(),
            url_slug: "agency".to_string(),
        },
        advisory: DEFAULT_ADVISORY.to_string(),
    }
}

fn task(
    id: u64,
    client: &str,
    title: &str,
    kind: &str,
    due: DateTime<Utc>,
    sla_status: SlaStatus,
    assignee: &str,
) -> Task {
    Task {
        id,
        client: client.to_string(),
        title: title.to_string(),
        kind: kind.to_string(),
        due,
        sla_status,
        assignee: assignee.to_string(),
    }
}

fn demo_board(now: DateTime<Utc>) -> Board {
    let days = |n: i64| now + Duration::days(n);
    Board {
        todo: vec![
            task(101, "Acme Corp", "Q3 Social Assets", "Design", days(2), SlaStatus::Healthy, "EJ"),
            task(102, "NexusTech", "Landing Page V2", "Web", days(1), SlaStatus::Warning, "DT"),
        ],
        in_progress: vec![
            task(103, "Soylent Corp", "Explainer Video", "Motion", now, SlaStatus::Danger, "SC"),
            task(104, "Acme Corp", "Email Templates", "Design", days(1), SlaStatus::Healthy, "AJ"),
            task(105, "Globex", "Data Dashboard", "Web", days(3), SlaStatus::Healthy, "ML"),
        ],
        review: vec![
            task(106, "Umbrella", "Pitch Deck Polish", "Design", now, SlaStatus::Warning, "AJ"),
        ],
    }
}

fn staff(
    id: u64,
    name: &str,
    role: &str,
    team: &str,
    utilization: f64,
    velocity: u32,
    fpa: f64,
    status: StaffStatus,
    timezone: &str,
    email: &str,
    permission_role: PermissionRole,
) -> StaffMember {
    StaffMember {
        id,
        name: name.to_string(),
        role: role.to_string(),
        team: team.to_string(),
        utilization,
        velocity,
        fpa,
        status,
        timezone: timezone.to_string(),
        email: email.to_string(),
        permission_role,
    }
}

fn demo_staff() -> Vec<StaffMember> {
    use PermissionRole::{Admin, Member};
    use StaffStatus::{Burnout, Healthy, Risk, Under};
    vec![
        staff(1, "Alex Jensen", "Sr. Designer", "Brand Design", 94.0, 12, 88.0, Risk, "EMEA", "alex.j@agency.com", Admin),
        staff(2, "Sarah Connors", "Motion Lead", "Motion", 78.0, 8, 95.0, Healthy, "AMER", "sarah.c@agency.com", Admin),
        staff(3, "Dravius Thorne", "Full Stack Dev", "Web Dev", 102.0, 15, 92.0, Burnout, "APAC", "dravius.t@agency.com", Member),
        staff(4, "Emily Chen", "Designer", "Brand Design", 65.0, 10, 75.0, Under, "AMER", "emily.c@agency.com", Member),
        staff(5, "Marcus Low", "Data Analyst", "Data Ops", 88.0, 20, 98.0, Healthy, "EMEA", "marcus.l@agency.com", Member),
    ]
}

fn capacity(team: &str, allocated: f64, available: f64, utilization: f64) -> TeamCapacity {
    TeamCapacity {
        team: team.to_string(),
        allocated,
        available,
        utilization,
    }
}

fn demo_capacity() -> Vec<TeamCapacity> {
    vec![
        capacity("Brand Design", 850.0, 1000.0, 85.0),
        capacity("Motion", 580.0, 600.0, 96.6),
        capacity("Web Dev", 920.0, 1200.0, 76.6),
        capacity("Copy", 300.0, 400.0, 75.0),
        capacity("Data Ops", 650.0, 800.0, 81.2),
    ]
}

fn invoice(
    id: u64,
    client_name: &str,
    amount: f64,
    due_date: DateTime<Utc>,
    status: InvoiceStatus,
    description: &str,
) -> Invoice {
    Invoice {
        id,
        client_name: client_name.to_string(),
        amount,
        due_date,
        status,
        description: description.to_string(),
    }
}

fn demo_invoices(now: DateTime<Utc>) -> Vec<Invoice> {
    use InvoiceStatus::{Overdue, Paid, Pending};
    let days = |n: i64| now + Duration::days(n);
    let last_month = now.checked_sub_months(Months::new(1)).unwrap_or(now);
    vec![
        invoice(1, "Acme Corp", 15000.0, now, Pending, "Q3 Retainer"),
        invoice(2, "Globex", 25000.0, days(-5), Overdue, "Booster Hours"),
        invoice(3, "Soylent Corp", 8500.0, days(-2), Paid, "Current Month Retainer"),
        invoice(4, "NexusTech", 12000.0, days(30), Pending, "Next Month Retainer"),
        invoice(5, "Acme Corp", 45000.0, last_month, Paid, "Last Month Retainer"),
        invoice(6, "Globex", 55000.0, last_month, Paid, "Last Month Retainer"),
        invoice(7, "Umbrella Inc", 15000.0, days(-3), Paid, "Current Month Booster"),
    ]
}

fn period(month: &str, revenue: f64, costs: f64, margin: f64, mrr: f64, boosters: f64) -> MonthlyFinancials {
    MonthlyFinancials {
        month: month.to_string(),
        revenue,
        costs,
        margin,
        mrr,
        boosters,
    }
}

fn demo_financials() -> Vec<MonthlyFinancials> {
    vec![
        period("Jan", 120000.0, 70000.0, 50000.0, 115000.0, 5000.0),
        period("Feb", 135000.0, 75000.0, 60000.0, 125000.0, 10000.0),
        period("Mar", 142000.0, 82000.0, 60000.0, 130000.0, 12000.0),
        period("Apr", 155000.0, 85000.0, 70000.0, 145000.0, 10000.0),
        period("May", 175000.0, 95000.0, 80000.0, 160000.0, 15000.0),
        period("Jun", 189000.0, 98000.0, 91000.0, 172000.0, 17000.0),
    ]
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN)
}

fn client(
    id: u64,
    name: &str,
    plan: Plan,
    mrr: f64,
    health: u32,
    nps: i32,
    renewal: NaiveDate,
    usage: u32,
) -> Client {
    Client {
        id,
        name: name.to_string(),
        plan,
        mrr,
        health,
        nps,
        renewal,
        usage,
    }
}

fn demo_clients() -> Vec<Client> {
    use Plan::{Enterprise, Growth, Pro};
    vec![
        client(1, "Acme Corp", Enterprise, 45000.0, 92, 65, date(2024, 12, 1), 88),
        client(2, "NexusTech", Growth, 12000.0, 45, 30, date(2024, 8, 15), 105),
        client(3, "Soylent Corp", Pro, 8500.0, 98, 80, date(2024, 10, 1), 70),
        client(4, "Globex", Enterprise, 55000.0, 85, 75, date(2025, 1, 1), 82),
        client(5, "Umbrella Inc", Growth, 15000.0, 72, 50, date(2024, 9, 1), 95),
    ]
}

fn demo_onboarding() -> OnboardingPipeline {
    OnboardingPipeline {
        clients: vec![
            OnboardingClient {
                id: 1,
                name: "Stark Industries".to_string(),
                stage: "Contract Signed".to_string(),
                progress: 25,
                eta: "2 days".to_string(),
            },
            OnboardingClient {
                id: 2,
                name: "Wayne Ent.".to_string(),
                stage: "Tech Integration".to_string(),
                progress: 60,
                eta: "5 days".to_string(),
            },
            OnboardingClient {
                id: 3,
                name: "Massive Dynamic".to_string(),
                stage: "First Brief".to_string(),
                progress: 90,
                eta: "1 day".to_string(),
            },
        ],
        staff: vec![
            OnboardingCandidate {
                id: 1,
                name: "L. Croft".to_string(),
                role: "Designer".to_string(),
                stage: "Portfolio Review".to_string(),
                status: CandidateStatus::Pending,
            },
            OnboardingCandidate {
                id: 2,
                name: "N. Drake".to_string(),
                role: "Copywriter".to_string(),
                stage: "Contract Sent".to_string(),
                status: CandidateStatus::Waiting,
            },
        ],
    }
}

fn utc_date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0)
        .single()
        .expect("UTC datetime is always unambiguous")
}

fn report(
    id: u64,
    name: &str,
    created_at: DateTime<Utc>,
    metrics: &[&str],
    date_range: &str,
    schedule: ReportSchedule,
) -> CustomReport {
    CustomReport {
        id,
        name: name.to_string(),
        created_at,
        metrics: metrics.iter().map(|m| m.to_string()).collect(),
        date_range: date_range.to_string(),
        schedule,
    }
}

fn demo_reports() -> Vec<CustomReport> {
    vec![
        report(
            1,
            "Q2 Finance Overview",
            utc_date(2024, 6, 15),
            &["MRR", "Contribution Margin", "Client Profitability"],
            "This Quarter",
            ReportSchedule::Monthly,
        ),
        report(
            2,
            "Weekly Delivery Health",
            utc_date(2024, 6, 20),
            &["Staff Utilization", "On-time SLA", "First-Pass Acceptance (FPA)"],
            "Last 7 Days",
            ReportSchedule::Weekly,
        ),
        report(
            3,
            "Acme Corp - Performance Deep Dive",
            utc_date(2024, 6, 22),
            &["MRR", "Contribution Margin", "Plan Usage", "NPS Score"],
            "Last 30 Days",
            ReportSchedule::None,
        ),
    ]
}

fn activity(id: u64, kind: ActivityKind, message: &str, time: &str) -> ActivityEntry {
    ActivityEntry {
        id,
        kind,
        message: message.to_string(),
        time: time.to_string(),
    }
}

fn demo_activity() -> Vec<ActivityEntry> {
    use ActivityKind::{Alert, Info, Neutral, Success};
    vec![
        activity(1, Alert, "Margin dip detected in \"NexusTech\" account due to high revisions.", "10m ago"),
        activity(2, Success, "New client \"Stark Industries\" contract signed ($50k ARR).", "1h ago"),
        activity(3, Info, "4 SLA breaches imminent in Motion queue.", "2h ago"),
        activity(4, Neutral, "Monthly board pack generated successfully.", "5h ago"),
    ]
}

fn demo_chat() -> Vec<ChatMessage> {
    vec![
        ChatMessage {
            id: 1,
            sender: ChatSender::User,
            text: "How's our margin on the NexusTech account?".to_string(),
            actions: Vec::new(),
        },
        ChatMessage {
            id: 2,
            sender: ChatSender::Assistant,
            text: "The margin on \"NexusTech\" has dipped by 3% over the last 7 days. This seems \
                   to be caused by high freelance utilization due to an increased number of \
                   revisions."
                .to_string(),
            actions: vec![AssistantAction::ShowDetails, AssistantAction::OptimizeSpend],
        },
    ]
}
