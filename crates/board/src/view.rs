use shared::domain::ActivitySet;

/// One participant row; carries its owning activity so the row's delete control can be
/// tagged without looking the card up again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantRow {
    pub activity: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityCardView {
    pub name: String,
    pub description: String,
    pub schedule: String,
    pub spots_left: i64,
    pub participants: Vec<ParticipantRow>,
}

pub fn build_views(activities: &ActivitySet) -> Vec<ActivityCardView> {
    activities
        .iter()
        .map(|(name, details)| ActivityCardView {
            name: name.clone(),
            description: details.description.clone(),
            schedule: details.schedule.clone(),
            spots_left: details.spots_left(),
            participants: details
                .participants
                .iter()
                .map(|email| ParticipantRow {
                    activity: name.clone(),
                    email: email.clone(),
                })
                .collect(),
        })
        .collect()
}
