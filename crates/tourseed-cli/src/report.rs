//! Console rendering of reconcile and audit reports.

use tourseed_reconcile::{
  AuditReport, ReconcileReport,
  audit::AuditWarning,
  outcome::DropReason,
};

pub fn print_reconcile(report: &ReconcileReport) {
  for outcome in &report.updated {
    println!(
      "updated  {}: {} days, {} blocks, {} items, {} tags",
      outcome.title, outcome.days, outcome.blocks, outcome.items, outcome.tags
    );
    for dropped in &outcome.dropped {
      let reason = match &dropped.reason {
        DropReason::TagUnresolved(e) => format!("tag unresolved: {e}"),
        DropReason::LocationUnresolved(e) => format!("location unresolved: {e}"),
        DropReason::InsertFailed(e) => format!("insert failed: {e}"),
        DropReason::ParentMissing => "parent not inserted".to_owned(),
      };
      println!("         dropped {:?} {:?}: {reason}", dropped.kind, dropped.label);
    }
  }
  for title in &report.skipped {
    println!("skipped  {title}: no catalog entry");
  }
  for failure in &report.failures {
    println!("error    {} ({:?}): {}", failure.title, failure.stage, failure.message);
  }

  println!();
  println!(
    "{} updated, {} skipped, {} errors, {} items inserted, {} rows dropped",
    report.updated_count(),
    report.skipped_count(),
    report.failures.len(),
    report.item_count(),
    report.dropped_count()
  );
}

pub fn print_audit(report: &AuditReport) {
  for tour in &report.tours {
    println!("{}", tour.title);
    println!("  city:     {}", tour.city.as_deref().unwrap_or("(none)"));
    println!("  duration: {} declared, {} days found", tour.declared_duration, tour.day_count);
    println!("  blocks:   {}", tour.block_count);
    println!("  items:    {}", tour.item_count);
    for day in &tour.blocks_per_day {
      println!(
        "    day {}: {} blocks, {} items",
        day.day_number, day.block_count, day.item_count
      );
    }
    match tour.warning {
      Some(AuditWarning::NoLocations) => println!("  WARNING: no locations"),
      Some(AuditWarning::FewLocations) => println!("  WARNING: very few locations"),
      None => {}
    }
  }
  for failure in &report.failures {
    println!("error    {}: {}", failure.title, failure.message);
  }

  println!();
  println!("{} tours audited, {} with warnings", report.tours.len(), report.warning_count());
}
