use crate::infra::{
    load_directory, parse_datetime, parse_distance, parse_slot, parse_year, sample_inbox,
    sample_schedule, seed_connections, InMemoryConnectionRegistry, DEMO_USER_ID,
};
use chrono::{Local, NaiveDateTime};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use study_buddy::activity::{ConversationSummary, DashboardSummary, Inbox, Message, MessageId};
use study_buddy::connections::ConnectionRegistry;
use study_buddy::directory::BuddyDirectory;
use study_buddy::discovery::{
    apply_filters, AvailabilitySlot, BuddyDiscoveryService, Candidate, CandidateId, CandidateMatch,
    CriteriaUpdate, DiscoveryServiceError, DistanceBucket, FilterCriteria, SessionUser, YearOfStudy,
};
use study_buddy::error::AppError;
use study_buddy::profile::{ProfileEdit, ProfileStore, ProfileUpdate};

#[derive(Args, Debug, Default)]
pub(crate) struct SearchArgs {
    /// Free-text search over name, major, and subjects
    #[arg(long, default_value = "")]
    pub(crate) query: String,
    /// Subject tag to require (repeatable; any selected subject matches)
    #[arg(long = "subject")]
    pub(crate) subjects: Vec<String>,
    /// Availability slot such as "Weekday evenings" (repeatable)
    #[arg(long = "availability", value_parser = parse_slot)]
    pub(crate) availability: Vec<AvailabilitySlot>,
    /// Year of study: 1, 2, 3, 4, 5+, or Graduate
    #[arg(long, value_parser = parse_year)]
    pub(crate) year: Option<YearOfStudy>,
    /// Distance bucket such as "10 miles" or "Remote only"
    #[arg(long, value_parser = parse_distance)]
    pub(crate) distance: Option<DistanceBucket>,
    /// Roster CSV export to search instead of the sample roster
    #[arg(long)]
    pub(crate) directory_csv: Option<PathBuf>,
}

impl SearchArgs {
    fn criteria(&self) -> FilterCriteria {
        let criteria = FilterCriteria::default()
            .with_query(self.query.clone())
            .with_year(self.year)
            .with_distance(self.distance);
        let criteria = self
            .subjects
            .iter()
            .fold(criteria, |current, subject| current.toggle_subject(subject.clone()));
        self.availability
            .iter()
            .fold(criteria, |current, slot| current.toggle_availability(*slot))
    }
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Reference time for the dashboard (YYYY-MM-DDTHH:MM). Defaults to now.
    #[arg(long, value_parser = parse_datetime)]
    pub(crate) now: Option<NaiveDateTime>,
    /// Free-text query applied during the discovery walkthrough
    #[arg(long, default_value = "")]
    pub(crate) query: String,
    /// Roster CSV export to browse instead of the sample roster
    #[arg(long)]
    pub(crate) directory_csv: Option<PathBuf>,
}

pub(crate) fn run_search(args: SearchArgs) -> Result<(), AppError> {
    let directory = load_directory(args.directory_csv.as_deref())?;
    let candidates = directory.candidates()?;
    let criteria = args.criteria();
    let matches = apply_filters(&candidates, &criteria);

    render_matches(&matches, candidates.len(), criteria.active_filter_count());
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        now,
        query,
        directory_csv,
    } = args;
    let now = now.unwrap_or_else(|| Local::now().naive_local());

    let directory = Arc::new(load_directory(directory_csv.as_deref())?);
    let registry = Arc::new(InMemoryConnectionRegistry::seeded(seed_connections()));
    let service = BuddyDiscoveryService::new(directory, registry.clone());

    println!("Study buddy demo");
    println!("Reference time: {now}");

    let profiles = ProfileStore::new();
    let demo_user = CandidateId::new(DEMO_USER_ID);
    profiles.open(
        &SessionUser {
            id: demo_user.clone(),
            full_name: "Demo Student".to_string(),
        },
        None,
    )?;
    profiles.update(
        &demo_user,
        ProfileUpdate {
            major: Some("Computer Science".to_string()),
            year_of_study: Some(YearOfStudy::Third),
            ..ProfileUpdate::default()
        },
    )?;
    for edit in [
        ProfileEdit::AddSubject {
            subject: "Algorithms".to_string(),
        },
        ProfileEdit::AddPreference {
            preference: "Practice problems".to_string(),
        },
        ProfileEdit::ToggleAvailability {
            slot: AvailabilitySlot::WeekendAfternoons,
        },
    ] {
        profiles.edit(&demo_user, edit)?;
    }
    let profile = profiles.get(&demo_user)?;
    println!("\nYour profile: {}", describe(&profile.to_candidate()));

    let session_id = service.open_session(profile.session_user())?;

    if !query.is_empty() {
        service.update_criteria(&session_id, CriteriaUpdate::SetQuery { query })?;
    }
    for slot in &profile.availability {
        service.update_criteria(&session_id, CriteriaUpdate::ToggleAvailability { slot: *slot })?;
    }

    let results = service.search(&session_id)?;
    println!(
        "\nDiscovery ({} of {} candidates, {} active filters)",
        results.matches.len(),
        results.total_candidates,
        results.active_filters
    );
    render_session_matches(&results.matches);

    if let Some(first) = results.matches.first() {
        let outcome = service.send_request(&session_id, &first.candidate.id)?;
        let note = if outcome.connection_created {
            "new pending connection"
        } else {
            "already in your connections"
        };
        println!(
            "\nRequest sent to {} ({}, status {})",
            first.candidate.full_name,
            note,
            outcome.status.label()
        );
    }

    service.update_criteria(&session_id, CriteriaUpdate::Clear)?;
    let cleared = service.search(&session_id)?;
    let flagged = cleared.matches.iter().filter(|m| m.request_sent).count();
    println!(
        "Filters cleared: {} candidates listed, {} with a request sent",
        cleared.matches.len(),
        flagged
    );

    let connections = registry.list().map_err(DiscoveryServiceError::from)?;
    let schedule = sample_schedule();
    let dashboard = DashboardSummary::build(&schedule, &connections, now);
    render_dashboard(&dashboard);

    let mut inbox = sample_inbox();
    let waiting = inbox
        .summaries(&connections, "")
        .into_iter()
        .find(|summary| summary.unread > 0);
    if let Some(summary) = waiting {
        inbox.send(Message {
            id: MessageId(format!("msg-{}", inbox.messages().len() + 1)),
            sender_id: demo_user.clone(),
            recipient_id: summary.buddy_id.clone(),
            content: "Thanks for the message! Let's sort it out at our next session.".to_string(),
            sent_at: now,
            read: true,
        });
        println!("\nReplied to {}", summary.name);
    }
    render_inbox(&inbox, &inbox.summaries(&connections, ""));

    Ok(())
}

fn render_matches(matches: &[&Candidate], total: usize, active_filters: usize) {
    let noun = if matches.len() == 1 { "Match" } else { "Matches" };
    println!("{} {} Found", matches.len(), noun);
    println!("(searched {total} candidates, {active_filters} active filters)");
    for candidate in matches {
        println!("- {}", describe(candidate));
    }
}

fn render_session_matches(matches: &[CandidateMatch]) {
    if matches.is_empty() {
        println!("- no buddies match the current filters");
    }
    for entry in matches {
        let marker = if entry.request_sent {
            " [request sent]"
        } else {
            ""
        };
        println!("- {}{}", describe(&entry.candidate), marker);
    }
}

fn describe(candidate: &Candidate) -> String {
    let mut line = candidate.full_name.clone();
    if let Some(major) = &candidate.major {
        line.push_str(&format!(", {major}"));
    }
    if let Some(year) = candidate.year_of_study {
        line.push_str(&format!(" (year {})", year.label()));
    }
    if !candidate.subjects.is_empty() {
        let shown: Vec<&str> = candidate
            .subjects
            .iter()
            .take(3)
            .map(String::as_str)
            .collect();
        line.push_str(&format!(" | {}", shown.join(", ")));
        if candidate.subjects.len() > 3 {
            line.push_str(&format!(" +{} more", candidate.subjects.len() - 3));
        }
    }
    line
}

fn render_dashboard(dashboard: &DashboardSummary) {
    println!("\nUpcoming sessions");
    if dashboard.upcoming_sessions.is_empty() {
        println!("- none scheduled");
    }
    for session in &dashboard.upcoming_sessions {
        println!(
            "- {} | {} | {}h {}",
            session.scheduled_at,
            session.title,
            session.duration_hours,
            session.mode.label()
        );
    }

    println!("\nPast sessions ({} completed)", dashboard.completed_sessions());
    for session in &dashboard.past_sessions {
        println!("- {} | {}", session.scheduled_at, session.title);
    }

    println!("\nActive connections");
    for connection in &dashboard.active_connections {
        println!(
            "- [{}] {} ({})",
            connection.initials(),
            connection.name,
            connection.subject
        );
    }

    println!("\nPending connections");
    for connection in &dashboard.pending_connections {
        println!("- [{}] {}", connection.initials(), connection.name);
    }
}

fn render_inbox(inbox: &Inbox, summaries: &[ConversationSummary]) {
    println!("\nConversations");
    for summary in summaries {
        let preview = summary
            .last_message
            .as_ref()
            .map(|message| message.content.as_str())
            .unwrap_or("no messages yet");
        println!(
            "- [{}] {} ({} unread, {} total): {}",
            summary.initials,
            summary.name,
            summary.unread,
            inbox.conversation(&summary.buddy_id).len(),
            preview
        );
    }
}
