// Copyright 2025 the Agenda Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The retained scene: marks, pending changes and running tweens.

extern crate alloc;

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::time::Duration;

use hashbrown::HashMap;
use kurbo::Point;
use peniko::Color;

use crate::diff::Change;
use crate::{Attr, Attrs, LayerId, Mark, MarkDiff, MarkId, TransitionSpec, Tween};

/// A retained set of marks with a transition clock.
///
/// The scene never renders anything itself. Callers mutate it (immediately, or through
/// scheduled tweens), advance its clock, and hand the resulting [`MarkDiff`]s to a
/// [`Surface`](crate::Surface).
#[derive(Debug, Default)]
pub struct Scene {
    marks: HashMap<MarkId, Mark>,
    tweens: Vec<Tween>,
    changes: HashMap<MarkId, Change>,
    change_order: Vec<MarkId>,
    now: Duration,
    next_seq: u64,
}

impl Scene {
    /// Creates an empty scene with its clock at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the scene clock.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Returns the number of marks.
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    /// Returns `true` if the scene holds no marks.
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Returns the mark with the given id.
    pub fn get(&self, id: MarkId) -> Option<&Mark> {
        self.marks.get(&id)
    }

    /// Returns the ids of all marks in `layer`, in id order.
    pub fn layer_ids(&self, layer: LayerId) -> Vec<MarkId> {
        let mut ids: Vec<_> = self
            .marks
            .keys()
            .copied()
            .filter(|id| id.layer() == layer)
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Inserts a mark, replacing any mark with the same id.
    ///
    /// Tweens targeting a replaced mark are dropped.
    pub fn insert(&mut self, mark: Mark) {
        let id = mark.id;
        let change = if self.marks.insert(id, mark).is_some() {
            self.tweens.retain(|t| t.id != id);
            Change::Update
        } else {
            Change::Enter
        };
        self.record(id, change);
    }

    /// Removes a mark and any tweens targeting it.
    pub fn remove(&mut self, id: MarkId) -> Option<Mark> {
        let removed = self.marks.remove(&id)?;
        self.tweens.retain(|t| t.id != id);
        self.record(id, Change::Exit);
        Some(removed)
    }

    /// Removes every mark in `layer`.
    pub fn clear_layer(&mut self, layer: LayerId) {
        for id in self.layer_ids(layer) {
            self.remove(id);
        }
    }

    /// Sets an attribute immediately. Returns `false` if the mark does not exist.
    pub fn set_attr(&mut self, id: MarkId, attr: Attr, value: f64) -> bool {
        let Some(mark) = self.marks.get_mut(&id) else {
            return false;
        };
        if mark.set(attr, value) {
            self.record(id, Change::Update);
        }
        true
    }

    /// Sets the stroke paint immediately. Returns `false` if the mark does not exist.
    pub fn set_stroke(&mut self, id: MarkId, stroke: Color) -> bool {
        let Some(mark) = self.marks.get_mut(&id) else {
            return false;
        };
        if mark.stroke != Some(stroke) {
            mark.stroke = Some(stroke);
            self.record(id, Change::Update);
        }
        true
    }

    /// Schedules a transition over an ordered group of marks.
    ///
    /// `targets` is called once per mark with its index in `ids` and returns the attribute
    /// values the mark should reach. Start values are captured when each tween's delay
    /// elapses, not now. Missing marks are skipped.
    pub fn transition(
        &mut self,
        ids: &[MarkId],
        spec: &TransitionSpec,
        mut targets: impl FnMut(usize, MarkId) -> Attrs,
    ) {
        for (index, &id) in ids.iter().enumerate() {
            if !self.marks.contains_key(&id) {
                continue;
            }
            let start = self.now.saturating_add(spec.start_offset(index));
            for (attr, to) in targets(index, id) {
                let seq = self.next_seq;
                self.next_seq += 1;
                self.tweens.push(Tween {
                    seq,
                    id,
                    attr,
                    start,
                    duration: spec.duration,
                    easing: spec.easing,
                    from: None,
                    to,
                });
            }
        }
    }

    /// Advances the clock to `now` and applies every tween that is due.
    ///
    /// The clock never moves backwards; an earlier `now` is ignored.
    pub fn advance(&mut self, now: Duration) {
        if now > self.now {
            self.now = now;
        }
        let now = self.now;
        // Tweens that ended by `now` land first, in the order they ended; running tweens
        // follow in scheduling order (the order of `tweens`), so later ones overwrite earlier.
        let (mut ended, running): (Vec<usize>, Vec<usize>) = (0..self.tweens.len())
            .filter(|&i| self.tweens[i].start <= now)
            .partition(|&i| self.tweens[i].end() <= now);
        ended.sort_by_key(|&i| (self.tweens[i].end(), self.tweens[i].seq));

        let mut touched = Vec::new();
        for i in ended.into_iter().chain(running) {
            let tween = &mut self.tweens[i];
            let Some(mark) = self.marks.get_mut(&tween.id) else {
                continue;
            };
            let (attr, to) = (tween.attr, tween.to);
            let from = *tween
                .from
                .get_or_insert_with(|| mark.get(attr).unwrap_or(to));
            if mark.set(attr, tween.value_at(from, now)) {
                touched.push(tween.id);
            }
        }
        self.tweens.retain(|t| t.end() > now);
        for id in touched {
            self.record(id, Change::Update);
        }
    }

    /// Returns the number of tweens still waiting or running.
    pub fn pending_tweens(&self) -> usize {
        self.tweens.len()
    }

    /// Returns `true` if no tween is waiting or running.
    pub fn is_settled(&self) -> bool {
        self.tweens.is_empty()
    }

    /// Returns the time at which the last scheduled tween ends (or the clock, if none).
    pub fn settle_time(&self) -> Duration {
        self.tweens
            .iter()
            .map(Tween::end)
            .max()
            .map_or(self.now, |end| end.max(self.now))
    }

    /// Returns the topmost mark under `pos` accepted by `filter`.
    ///
    /// Marks are ranked by `(z_index, id)`, the same order surfaces paint them in.
    pub fn hit_test(&self, pos: Point, filter: impl Fn(MarkId) -> bool) -> Option<MarkId> {
        self.marks
            .values()
            .filter(|m| filter(m.id) && m.hit(pos))
            .max_by_key(|m| (m.z_index, m.id))
            .map(|m| m.id)
    }

    /// Drains the changes accumulated since the last call.
    ///
    /// Changes are coalesced per mark and reported in first-touched order; `Enter` and
    /// `Update` carry the mark as it is now.
    pub fn take_diffs(&mut self) -> Vec<MarkDiff> {
        let order = core::mem::take(&mut self.change_order);
        let mut out = Vec::with_capacity(order.len());
        for id in order {
            let Some(change) = self.changes.remove(&id) else {
                continue;
            };
            let diff = match (change, self.marks.get(&id)) {
                (Change::Enter, Some(mark)) => MarkDiff::Enter {
                    id,
                    new: Box::new(mark.clone()),
                },
                (Change::Update, Some(mark)) => MarkDiff::Update {
                    id,
                    new: Box::new(mark.clone()),
                },
                (Change::Exit, _) => MarkDiff::Exit { id },
                (_, None) => continue,
            };
            out.push(diff);
        }
        out
    }

    fn record(&mut self, id: MarkId, change: Change) {
        match self.changes.get(&id).copied() {
            Some(pending) => match pending.merge(change) {
                Some(merged) => {
                    self.changes.insert(id, merged);
                }
                None => {
                    self.changes.remove(&id);
                }
            },
            None => {
                self.changes.insert(id, change);
                self.change_order.push(id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use smallvec::smallvec;

    use super::*;
    use crate::Easing;

    const LAYER: LayerId = LayerId(1);

    fn circle(row: u64, r: f64) -> Mark {
        Mark::builder(MarkId::for_row(LAYER, row))
            .circle()
            .attr(Attr::Cx, 10.0 * row as f64)
            .attr(Attr::Cy, 0.0)
            .attr(Attr::R, r)
            .build()
    }

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn r_of(scene: &Scene, row: u64) -> f64 {
        scene
            .get(MarkId::for_row(LAYER, row))
            .and_then(|m| m.get(Attr::R))
            .unwrap()
    }

    #[test]
    fn insert_and_flush_reports_enter_once() {
        let mut scene = Scene::new();
        scene.insert(circle(0, 1.0));
        scene.set_attr(MarkId::for_row(LAYER, 0), Attr::R, 2.0);
        let diffs = scene.take_diffs();
        assert_eq!(diffs.len(), 1, "enter absorbs the update");
        match &diffs[0] {
            MarkDiff::Enter { new, .. } => assert_eq!(new.get(Attr::R), Some(2.0)),
            other => panic!("expected Enter, got {other:?}"),
        }
        assert!(scene.take_diffs().is_empty(), "diffs are drained");
    }

    #[test]
    fn staggered_tweens_start_in_index_order() {
        let mut scene = Scene::new();
        let ids: Vec<_> = (0..3).map(|row| MarkId::for_row(LAYER, row)).collect();
        for row in 0..3 {
            scene.insert(circle(row, 0.0));
        }
        let spec = TransitionSpec::new(ms(100))
            .with_stagger(ms(50))
            .with_easing(Easing::Linear);
        scene.transition(&ids, &spec, |_, _| smallvec![(Attr::R, 10.0)]);
        assert_eq!(scene.settle_time(), ms(200), "last mark starts at 100ms");

        scene.advance(ms(0));
        scene.advance(ms(50));
        assert_eq!(r_of(&scene, 0), 5.0, "first mark is half way");
        assert_eq!(r_of(&scene, 1), 0.0, "second mark just started");
        assert_eq!(r_of(&scene, 2), 0.0, "third mark is still waiting");

        scene.advance(ms(200));
        for row in 0..3 {
            assert_eq!(r_of(&scene, row), 10.0, "all marks reach the target");
        }
        assert!(scene.is_settled(), "finished tweens are dropped");
    }

    #[test]
    fn later_transition_wins_while_overlapping() {
        let mut scene = Scene::new();
        let id = MarkId::for_row(LAYER, 0);
        scene.insert(circle(0, 0.0));
        let slow = TransitionSpec::new(ms(1000)).with_easing(Easing::Linear);
        let fast = TransitionSpec::new(ms(100)).with_easing(Easing::Linear);
        scene.transition(&[id], &slow, |_, _| smallvec![(Attr::R, 100.0)]);
        scene.transition(&[id], &fast, |_, _| smallvec![(Attr::R, 0.0)]);

        scene.advance(ms(0));
        scene.advance(ms(50));
        assert_eq!(r_of(&scene, 0), 0.0, "the newer tween overwrites the older one");

        scene.advance(ms(500));
        assert_eq!(r_of(&scene, 0), 50.0, "the older tween resumes after the newer ends");

        scene.advance(ms(1000));
        assert_eq!(r_of(&scene, 0), 100.0, "the older tween wins at its own end");
    }

    #[test]
    fn start_value_is_captured_when_delay_elapses() {
        let mut scene = Scene::new();
        let id = MarkId::for_row(LAYER, 0);
        scene.insert(circle(0, 0.0));
        let delayed = TransitionSpec::new(ms(100))
            .with_delay(ms(100))
            .with_easing(Easing::Linear);
        scene.transition(&[id], &delayed, |_, _| smallvec![(Attr::R, 20.0)]);
        scene.set_attr(id, Attr::R, 10.0);

        scene.advance(ms(150));
        assert_eq!(r_of(&scene, 0), 15.0, "interpolates from the value at start time");
    }

    #[test]
    fn removing_a_mark_drops_its_tweens() {
        let mut scene = Scene::new();
        let id = MarkId::for_row(LAYER, 0);
        scene.insert(circle(0, 0.0));
        scene.transition(&[id], &TransitionSpec::new(ms(100)), |_, _| {
            smallvec![(Attr::R, 5.0)]
        });
        scene.remove(id);
        assert!(scene.is_settled(), "no orphan tweens");
        assert!(
            scene.take_diffs().is_empty(),
            "enter followed by exit is invisible to surfaces"
        );
    }

    #[test]
    fn hit_test_prefers_topmost_mark() {
        let mut scene = Scene::new();
        scene.insert(circle(0, 50.0));
        scene.insert(circle(1, 50.0));
        let hit = scene.hit_test(Point::new(5.0, 0.0), |_| true);
        assert_eq!(hit, Some(MarkId::for_row(LAYER, 1)), "later rows paint on top");
        let hit = scene.hit_test(Point::new(5.0, 0.0), |id| id.row() == 0);
        assert_eq!(hit, Some(MarkId::for_row(LAYER, 0)), "filter restricts candidates");
    }
}
