use crate::discovery::{AvailabilitySlot, Candidate, CandidateId, YearOfStudy};

use AvailabilitySlot::{
    WeekdayAfternoons, WeekdayEvenings, WeekdayMornings, WeekendAfternoons, WeekendEvenings,
    WeekendMornings,
};

struct Profile {
    id: &'static str,
    full_name: &'static str,
    university: &'static str,
    major: &'static str,
    year: YearOfStudy,
    bio: &'static str,
    subjects: [&'static str; 4],
    availability: &'static [AvailabilitySlot],
    location: &'static str,
    learning_preferences: [&'static str; 3],
}

const PROFILES: [Profile; 9] = [
    Profile {
        id: "buddy-1",
        full_name: "Alex Johnson",
        university: "Stanford University",
        major: "Computer Science",
        year: YearOfStudy::Third,
        bio: "I'm passionate about algorithms and machine learning. Looking for study partners for advanced programming courses and AI research projects.",
        subjects: ["Algorithms", "Machine Learning", "Data Structures", "Artificial Intelligence"],
        availability: &[WeekdayEvenings, WeekendAfternoons],
        location: "Palo Alto, CA",
        learning_preferences: ["Visual learning", "Practice problems", "Group discussions"],
    },
    Profile {
        id: "buddy-2",
        full_name: "Sarah Williams",
        university: "Harvard University",
        major: "Biology",
        year: YearOfStudy::Second,
        bio: "Pre-med student interested in neuroscience and molecular biology. I enjoy teaching concepts to others as a way to reinforce my own understanding.",
        subjects: ["Organic Chemistry", "Molecular Biology", "Neuroscience", "Biochemistry"],
        availability: &[WeekdayMornings, WeekendMornings, WeekendAfternoons],
        location: "Cambridge, MA",
        learning_preferences: ["Flashcards", "Teaching others", "Lab work"],
    },
    Profile {
        id: "buddy-3",
        full_name: "Michael Chen",
        university: "MIT",
        major: "Physics",
        year: YearOfStudy::Fourth,
        bio: "Studying theoretical physics with a focus on quantum mechanics. Looking for study partners to discuss complex concepts and problems.",
        subjects: [
            "Quantum Mechanics",
            "Electromagnetism",
            "Mathematical Physics",
            "Thermodynamics",
        ],
        availability: &[WeekdayAfternoons, WeekdayEvenings],
        location: "Cambridge, MA",
        learning_preferences: ["Problem-solving", "Whiteboarding", "Conceptual discussions"],
    },
    Profile {
        id: "buddy-4",
        full_name: "Emily Rodriguez",
        university: "UCLA",
        major: "Psychology",
        year: YearOfStudy::Third,
        bio: "Focusing on developmental psychology and cognitive science. I love to create comprehensive study guides and share resources.",
        subjects: [
            "Cognitive Psychology",
            "Developmental Psychology",
            "Research Methods",
            "Statistics",
        ],
        availability: &[WeekdayMornings, WeekendEvenings],
        location: "Los Angeles, CA",
        learning_preferences: ["Study guides", "Group discussions", "Practice exams"],
    },
    Profile {
        id: "buddy-5",
        full_name: "David Kim",
        university: "Columbia University",
        major: "Economics",
        year: YearOfStudy::Second,
        bio: "Studying macroeconomics and financial markets. I prefer collaborative study sessions with a focus on real-world applications.",
        subjects: ["Macroeconomics", "Microeconomics", "Financial Markets", "Game Theory"],
        availability: &[WeekdayEvenings, WeekendAfternoons, WeekendEvenings],
        location: "New York, NY",
        learning_preferences: ["Case studies", "Data analysis", "Group projects"],
    },
    Profile {
        id: "buddy-6",
        full_name: "Olivia Thompson",
        university: "University of Michigan",
        major: "English Literature",
        year: YearOfStudy::Fourth,
        bio: "Specializing in Victorian literature and creative writing. I enjoy deep discussions about literary analysis and theory.",
        subjects: ["Victorian Literature", "Creative Writing", "Literary Theory", "Poetry"],
        availability: &[WeekdayAfternoons, WeekendMornings],
        location: "Ann Arbor, MI",
        learning_preferences: ["Reading groups", "Writing workshops", "Critical analysis"],
    },
    Profile {
        id: "buddy-7",
        full_name: "James Wilson",
        university: "University of Chicago",
        major: "Mathematics",
        year: YearOfStudy::Third,
        bio: "Focused on abstract algebra and number theory. Looking for study partners who enjoy tackling challenging problems together.",
        subjects: ["Abstract Algebra", "Number Theory", "Real Analysis", "Topology"],
        availability: &[WeekdayEvenings, WeekendAfternoons],
        location: "Chicago, IL",
        learning_preferences: ["Problem sets", "Study groups", "Proof writing"],
    },
    Profile {
        id: "buddy-8",
        full_name: "Sophia Garcia",
        university: "UC Berkeley",
        major: "Environmental Science",
        year: YearOfStudy::Second,
        bio: "Passionate about sustainability and conservation. I enjoy field work and data collection for environmental research.",
        subjects: ["Ecology", "Environmental Policy", "Climate Science", "Conservation Biology"],
        availability: &[WeekdayMornings, WeekendMornings, WeekendAfternoons],
        location: "Berkeley, CA",
        learning_preferences: ["Field work", "Data analysis", "Group projects"],
    },
    Profile {
        id: "buddy-9",
        full_name: "Ryan Patel",
        university: "NYU",
        major: "Business Administration",
        year: YearOfStudy::Fourth,
        bio: "Specializing in entrepreneurship and marketing. I have a background in startups and enjoy discussing business strategy.",
        subjects: ["Marketing", "Entrepreneurship", "Finance", "Business Strategy"],
        availability: &[WeekdayEvenings, WeekendAfternoons],
        location: "New York, NY",
        learning_preferences: ["Case studies", "Group discussions", "Practical applications"],
    },
];

pub(super) fn roster() -> Vec<Candidate> {
    PROFILES.iter().map(Profile::to_candidate).collect()
}

impl Profile {
    fn to_candidate(&self) -> Candidate {
        Candidate {
            id: CandidateId::new(self.id),
            full_name: self.full_name.to_string(),
            university: Some(self.university.to_string()),
            major: Some(self.major.to_string()),
            year_of_study: Some(self.year),
            bio: Some(self.bio.to_string()),
            subjects: self.subjects.iter().map(|s| s.to_string()).collect(),
            availability: self.availability.to_vec(),
            location: Some(self.location.to_string()),
            learning_preferences: self
                .learning_preferences
                .iter()
                .map(|p| p.to_string())
                .collect(),
        }
    }
}
