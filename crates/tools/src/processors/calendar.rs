//! Interview calendar invitations.

use tata_core::document::CalendarInvite;
use tata_core::error::ProcessorError;
use tata_core::input::{BookingMethod, CalendarInviteArgs, City, InterviewType, LocationType};

use super::require_non_empty;

/// Subject and greeting use this until the candidate is known.
pub const CANDIDATE_PLACEHOLDER: &str = "[Candidate Name]";

struct Office {
    address: &'static str,
    maps_link: &'static str,
}

fn office(city: City) -> Office {
    match city {
        City::Stockholm => Office {
            address: "Solnavägen 3H, 113 63 Stockholm",
            maps_link: "https://maps.app.goo.gl/TovPnSKBtW5MchH79",
        },
        City::Copenhagen => Office {
            address: "Havneholmen 6, 2450 København SV",
            maps_link: "https://maps.app.goo.gl/UEk4qiah1CCsvSWZ7",
        },
        City::Oslo => Office {
            address: "Snarøyveien 36, 1364 Fornebu, Norway",
            maps_link: "https://maps.app.goo.gl/Vu2iwSCthqhGvycU6",
        },
    }
}

fn interview_label(kind: InterviewType) -> &'static str {
    match kind {
        InterviewType::HiringManager => "Hiring Manager Interview",
        InterviewType::Case => "Case Interview",
        InterviewType::Team => "Team Interview",
        InterviewType::TaScreening => "Screening Interview",
    }
}

pub fn format_duration(minutes: u32) -> String {
    match minutes {
        90 => "1.5 hours".to_string(),
        60 => "1 hour".to_string(),
        m if m >= 120 && m % 60 == 0 => format!("{} hours", m / 60),
        m => format!("{m} minutes"),
    }
}

fn validate(args: &CalendarInviteArgs) -> Result<(), ProcessorError> {
    require_non_empty(&args.position_name, "position_name")?;
    require_non_empty(&args.hiring_manager_name, "hiring_manager_name")?;
    require_non_empty(&args.recruiter_name, "recruiter_name")?;
    if args.duration == 0 {
        return Err(ProcessorError::InvalidInput("duration must be positive".into()));
    }
    if args.location_type == LocationType::Onsite && args.city.is_none() {
        return Err(ProcessorError::InvalidInput(
            "city is required for on-site interviews".into(),
        ));
    }
    if args.booking_method == BookingMethod::Manual {
        let filled = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        if !filled(&args.interview_date) || !filled(&args.interview_time) {
            return Err(ProcessorError::InvalidInput(
                "interview_date and interview_time are required for manual booking".into(),
            ));
        }
    }
    Ok(())
}

pub fn generate(args: &CalendarInviteArgs) -> Result<CalendarInvite, ProcessorError> {
    validate(args)?;
    let label = interview_label(args.interview_type);

    let mut lines = vec![
        format!("Dear {CANDIDATE_PLACEHOLDER},"),
        String::new(),
        format!(
            "Thank you for your interest in the {} position at GlobalConnect. We would like to \
             invite you to a {} ({}).",
            args.position_name.trim(),
            label.to_lowercase(),
            format_duration(args.duration)
        ),
        String::new(),
    ];

    match args.booking_method {
        BookingMethod::Manual => {
            lines.push("Interview Details:".into());
            lines.push(format!("  Date: {}", args.interview_date.as_deref().unwrap_or_default()));
            lines.push(format!("  Time: {}", args.interview_time.as_deref().unwrap_or_default()));
        }
        BookingMethod::Jobylon => lines.push(
            "Please book a time that suits you through our booking system in Jobylon. You will \
             find the booking link in your application portal."
                .into(),
        ),
    }
    lines.push(String::new());

    match (args.location_type, args.city) {
        (LocationType::Onsite, Some(city)) => {
            let office = office(city);
            lines.push("Location: On-site at our office".into());
            lines.push(format!("  Address: {}", office.address));
            lines.push(format!("  Map: {}", office.maps_link));
        }
        _ => {
            lines.push("Location: Microsoft Teams (link will be sent with calendar invite)".into())
        }
    }
    lines.push(String::new());

    lines.push("You will be meeting with:".into());
    lines.push(format!(
        "  - {}, {}",
        args.hiring_manager_name.trim(),
        args.hiring_manager_title.trim()
    ));
    lines.push(String::new());

    if let Some(link) = args.job_ad_link.as_deref().filter(|l| !l.trim().is_empty()) {
        lines.push(format!("Job posting: {link}"));
        lines.push(String::new());
    }

    lines.push(
        "If you have any questions or need to reschedule, please don't hesitate to reach out.".into(),
    );
    lines.push(String::new());
    lines.push("Best regards,".into());
    lines.push(args.recruiter_name.trim().to_string());
    lines.push("GlobalConnect Talent Acquisition".into());

    Ok(CalendarInvite {
        subject: format!("{label} - {} - {CANDIDATE_PLACEHOLDER}", args.position_name.trim()),
        body: lines.join("\n"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> CalendarInviteArgs {
        CalendarInviteArgs {
            position_name: "Project Manager".into(),
            hiring_manager_name: "Kim Berg".into(),
            hiring_manager_title: "Head of Delivery".into(),
            recruiter_name: "Alex".into(),
            location_type: LocationType::Onsite,
            interview_type: InterviewType::HiringManager,
            duration: 90,
            booking_method: BookingMethod::Jobylon,
            city: Some(City::Oslo),
            interview_date: None,
            interview_time: None,
            job_ad_link: None,
        }
    }

    #[test]
    fn onsite_invite_includes_office_address() {
        let invite = generate(&args()).unwrap();
        assert_eq!(
            invite.subject,
            "Hiring Manager Interview - Project Manager - [Candidate Name]"
        );
        assert!(invite.body.contains("Snarøyveien 36"));
        assert!(invite.body.contains("(1.5 hours)"));
        assert!(invite.body.contains("Jobylon"));
    }

    #[test]
    fn manual_booking_requires_date_and_time() {
        let err = generate(&CalendarInviteArgs {
            booking_method: BookingMethod::Manual,
            interview_date: Some("Monday, 15 January".into()),
            ..args()
        })
        .unwrap_err();
        assert!(matches!(err, ProcessorError::InvalidInput(_)));

        let invite = generate(&CalendarInviteArgs {
            booking_method: BookingMethod::Manual,
            interview_date: Some("Monday, 15 January".into()),
            interview_time: Some("14:00".into()),
            ..args()
        })
        .unwrap();
        assert!(invite.body.contains("Time: 14:00"));
    }

    #[test]
    fn durations_read_naturally() {
        assert_eq!(format_duration(60), "1 hour");
        assert_eq!(format_duration(45), "45 minutes");
        assert_eq!(format_duration(180), "3 hours");
    }
}
