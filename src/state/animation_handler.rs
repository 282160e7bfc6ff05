use crate::resources::Sprite;

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum PlayerPose {
    Standing,
    Running,
    Airborne,
}

/// Two-frame run cycle. The countdown only moves while running.
pub struct AnimationHandler {
    pose: PlayerPose,
    timer: i32,
    frame: u8,
    delay: i32,
}

impl AnimationHandler {
    pub fn new(delay: u32) -> Self {
        AnimationHandler {
            pose: PlayerPose::Standing,
            timer: 0,
            frame: 0,
            delay: delay as i32,
        }
    }

    pub fn reset(&mut self) {
        self.timer = 0;
        self.frame = 0;
    }

    pub fn current_pose(&self) -> PlayerPose {
        self.pose
    }

    #[cfg(test)]
    pub fn current_frame(&self) -> u8 {
        self.frame
    }

    pub fn set_pose(&mut self, pose: PlayerPose) {
        self.pose = pose;
    }

    pub fn increment_frame(&mut self) {
        if self.pose != PlayerPose::Running {
            return;
        }
        let expired = self.timer < 0;
        self.timer -= 1;
        if expired {
            self.timer = self.delay;
            self.frame = 1 - self.frame;
        }
    }

    pub fn get_sprite(&self) -> Sprite {
        match self.pose {
            PlayerPose::Airborne => Sprite::GuyRun1,
            PlayerPose::Standing => Sprite::GuyStand,
            PlayerPose::Running if self.frame == 0 => Sprite::GuyRun1,
            PlayerPose::Running => Sprite::GuyRun2,
        }
    }
}
