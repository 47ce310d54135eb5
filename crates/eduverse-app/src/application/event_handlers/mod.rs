mod celebration_notifier;

pub use celebration_notifier::CelebrationNotifier;
