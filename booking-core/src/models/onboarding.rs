/// One instructional panel of the first-run walkthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OnboardingPanel {
    pub title: &'static str,
    pub description: &'static str,
    pub image: &'static str,
}

pub static ONBOARDING_PANELS: [OnboardingPanel; 3] = [
    OnboardingPanel {
        title: "Request a Ride",
        description: "Request a ride and get picked up by a nearby community driver",
        image: "/onboarding1.png",
    },
    OnboardingPanel {
        title: "Confirm Your Driver",
        description: "Huge network of drivers helps you find comfortable, safe and cheap ride",
        image: "/onboarding2.png",
    },
    OnboardingPanel {
        title: "Track your ride",
        description: "Know your driver in advance and be able to view current location in real time",
        image: "/onboarding3.png",
    },
];

impl OnboardingPanel {
    pub fn count() -> usize {
        ONBOARDING_PANELS.len()
    }

    pub fn get(step: usize) -> Option<&'static OnboardingPanel> {
        ONBOARDING_PANELS.get(step)
    }

    pub fn is_last(step: usize) -> bool {
        step + 1 >= ONBOARDING_PANELS.len()
    }
}
