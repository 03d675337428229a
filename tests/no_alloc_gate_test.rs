use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use polydrop::core::{GameSnapshot, GameState, Phase};
use polydrop::term::{FrameBuffer, GameView, Viewport};
use polydrop::types::{Direction, GameAction, Shape};

struct CountingAlloc;

static COUNT_ENABLED: AtomicBool = AtomicBool::new(false);
static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.realloc(ptr, layout, new_size)
    }
}

fn with_alloc_counting<F: FnOnce()>(f: F) -> usize {
    ALLOC_COUNT.store(0, Ordering::Relaxed);
    COUNT_ENABLED.store(true, Ordering::Relaxed);
    f();
    COUNT_ENABLED.store(false, Ordering::Relaxed);
    ALLOC_COUNT.load(Ordering::Relaxed)
}

// A single test per binary: the counter is process-wide.
#[test]
fn tick_input_snapshot_and_render_do_not_allocate() {
    // Setup (outside counting) so one-time allocations don't trip the gate.
    let mut gs = GameState::new(1);
    gs.start();
    let view = GameView::default();
    let viewport = Viewport::new(80, 24);
    let mut fb = FrameBuffer::new(viewport.width, viewport.height);
    let mut snap = GameSnapshot::default();

    // Warm-up.
    let _ = gs.tick();
    gs.snapshot_into(&mut snap);
    view.render_into(&snap, viewport, &mut fb);

    let allocs = with_alloc_counting(|| {
        for i in 0..2000u32 {
            let action = match i % 6 {
                0 => GameAction::Move(Direction::Left),
                1 => GameAction::RotateInPlane,
                2 => GameAction::Move(Direction::Right),
                3 => GameAction::RotateFlip,
                4 => GameAction::SelectShape(Shape::ALL[(i as usize / 6) % 4]),
                _ => GameAction::Move(Direction::Fall),
            };
            let _ = gs.apply_action(action);

            // Drives advance, lock, sweep and spawn.
            let _ = gs.tick();
            let _ = gs.take_last_event();
            let _ = gs.grid_snapshot();
            let _ = gs.active_piece_cells();

            if gs.phase() == Phase::Blocked {
                gs.reset();
            }

            gs.snapshot_into(&mut snap);
            view.render_into(&snap, viewport, &mut fb);
        }
    });

    assert_eq!(allocs, 0);
}
